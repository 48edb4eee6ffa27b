use crate::domain::ports::FileSource;
use crate::utils::error::Result;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

fn split_lines(text: &str) -> Vec<String> {
    text.lines().map(str::to_string).collect()
}

#[derive(Debug, Clone)]
pub struct LocalFileSource {
    base_path: PathBuf,
}

impl LocalFileSource {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Default for LocalFileSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileSource for LocalFileSource {
    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        let full_path = self.base_path.join(path);

        if !full_path.is_file() {
            tracing::debug!("No file at {}", full_path.display());
            return Ok(None);
        }

        let data = fs::read(&full_path)?;
        Ok(Some(split_lines(&String::from_utf8_lossy(&data))))
    }
}

/// Pages held in memory, keyed by the exact path the rewriter will ask for.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileSource {
    files: HashMap<PathBuf, String>,
}

impl MemoryFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.insert(path, content);
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, content: impl Into<String>) {
        self.files.insert(path.into(), content.into());
    }
}

impl FileSource for MemoryFileSource {
    fn read_lines(&self, path: &Path) -> Result<Option<Vec<String>>> {
        Ok(self.files.get(path).map(|content| split_lines(content)))
    }
}
