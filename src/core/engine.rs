use crate::core::rewriter::FrameRewriter;
use crate::domain::model::{FrameContent, RenderedFrame};
use crate::domain::ports::FileSource;
use crate::utils::error::Result;
use std::path::Path;

pub struct ViewerEngine<S: FileSource> {
    rewriter: FrameRewriter<S>,
}

impl<S: FileSource> ViewerEngine<S> {
    pub fn new(rewriter: FrameRewriter<S>) -> Self {
        Self { rewriter }
    }

    pub fn rewriter(&self) -> &FrameRewriter<S> {
        &self.rewriter
    }

    pub fn render(&self, file_path: &Path, dir_name: &str) -> Result<RenderedFrame> {
        tracing::info!(
            "Rendering {} for owner {}",
            file_path.display(),
            self.rewriter.context().owner_id
        );

        let content = self.rewriter.modified_file_content(file_path, dir_name)?;
        let missing = content.is_missing();
        if missing {
            tracing::warn!("⚠️ {} does not exist, nothing to show", file_path.display());
        } else {
            tracing::info!("Rendered {} lines", content.len());
        }

        Ok(RenderedFrame {
            file: file_path.display().to_string(),
            dir_name: dir_name.to_string(),
            missing,
            lines: match content {
                FrameContent::Missing => Vec::new(),
                FrameContent::Lines(lines) => lines,
            },
        })
    }
}
