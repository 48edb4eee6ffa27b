//! Rewrites a Melodic report page so it can sit inside the host viewer pane.
//!
//! Each line gets its anchors and images repointed at the owner's endpoints
//! and loses the document-level tags. A line holding an `<IFRAME ... src=...>`
//! is replaced by the rewritten content of the framed page.

use crate::core::{images, links, tags};
use crate::domain::model::{FrameContent, RewriteSettings, ViewerContext};
use crate::domain::ports::FileSource;
use crate::utils::error::Result;
use regex::Regex;
use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

static IFRAME_SRC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<IFRAME.*src=(.*) ").expect("iframe pattern"));

/// Frame targets referenced by a line, quotes trimmed.
pub fn frame_targets(line: &str) -> Vec<&str> {
    IFRAME_SRC
        .captures_iter(line)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().trim_matches(|c: char| c == '"' || c == '\''))
        .collect()
}

/// Dir names are glued directly in front of relative links, so they need a
/// trailing slash.
pub fn normalize_dir_name(dir_name: &str) -> String {
    if dir_name.is_empty() || dir_name.ends_with('/') {
        dir_name.to_string()
    } else {
        format!("{}/", dir_name)
    }
}

/// Lexical normalisation; the source may not be a real filesystem.
fn frame_key(path: &Path) -> PathBuf {
    let mut key = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(key.components().next_back(), Some(Component::Normal(_))) {
                    key.pop();
                } else {
                    key.push("..");
                }
            }
            other => key.push(other.as_os_str()),
        }
    }
    key
}

pub struct FrameRewriter<S: FileSource> {
    source: S,
    context: ViewerContext,
    settings: RewriteSettings,
}

impl<S: FileSource> FrameRewriter<S> {
    pub fn new(source: S, context: ViewerContext) -> Self {
        Self {
            source,
            context,
            settings: RewriteSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RewriteSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn context(&self) -> &ViewerContext {
        &self.context
    }

    pub fn settings(&self) -> &RewriteSettings {
        &self.settings
    }

    /// Rewrites a single line. Frames are not followed.
    pub fn rewrite_line(&self, line: &str, dir_name: &str) -> String {
        self.rewrite_line_in(line, &normalize_dir_name(dir_name))
    }

    fn rewrite_line_in(&self, line: &str, dir_name: &str) -> String {
        let owner_id = &self.context.owner_id;
        let new_line = links::rewrite_hrefs_in_line(line, owner_id, dir_name);

        let image_dir = format!("{}/{}", self.context.collection_name, dir_name);
        let new_line = images::rewrite_imgs_in_line(&new_line, owner_id, &image_dir, &self.settings);

        tags::strip_structural_tags(&new_line)
    }

    /// Returns the rewritten lines of `file_path`, with framed pages spliced in.
    ///
    /// `dir_name` is the page's directory inside the collection. A file that
    /// does not exist yields [`FrameContent::Missing`]. A missing framed page
    /// contributes no lines.
    pub fn modified_file_content(&self, file_path: &Path, dir_name: &str) -> Result<FrameContent> {
        let dir_name = normalize_dir_name(dir_name);
        let mut open_frames = Vec::new();
        self.process(file_path, &dir_name, &mut open_frames)
    }

    fn process(
        &self,
        file_path: &Path,
        dir_name: &str,
        open_frames: &mut Vec<PathBuf>,
    ) -> Result<FrameContent> {
        let Some(source_lines) = self.source.read_lines(file_path)? else {
            tracing::debug!("Skipping missing page {}", file_path.display());
            return Ok(FrameContent::Missing);
        };

        tracing::debug!(
            "Rewriting {} ({} lines, frame depth {})",
            file_path.display(),
            source_lines.len(),
            open_frames.len()
        );
        open_frames.push(frame_key(file_path));

        let base_dir = file_path.parent().unwrap_or_else(|| Path::new(""));
        let mut lines = Vec::with_capacity(source_lines.len());

        for line in &source_lines {
            let new_line = self.rewrite_line_in(line, dir_name);
            let targets = frame_targets(&new_line);
            if targets.is_empty() {
                lines.push(new_line);
                continue;
            }

            for target in targets {
                let frame_path = base_dir.join(target.trim_start_matches('/'));

                if open_frames.len() >= self.settings.max_frame_depth {
                    tracing::warn!(
                        "⚠️ Frame {} nested deeper than {} levels, skipped",
                        frame_path.display(),
                        self.settings.max_frame_depth
                    );
                    continue;
                }
                if open_frames.contains(&frame_key(&frame_path)) {
                    tracing::warn!(
                        "⚠️ Frame {} includes itself, skipped",
                        frame_path.display()
                    );
                    continue;
                }

                match self.process(&frame_path, dir_name, open_frames)? {
                    FrameContent::Lines(frame_lines) => lines.extend(frame_lines),
                    FrameContent::Missing => {
                        tracing::debug!("Frame {} not found", frame_path.display());
                    }
                }
            }
        }

        open_frames.pop();
        Ok(FrameContent::Lines(lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryFileSource;

    fn rewriter(source: MemoryFileSource) -> FrameRewriter<MemoryFileSource> {
        FrameRewriter::new(source, ViewerContext::new("42", "study"))
    }

    #[test]
    fn test_frame_targets() {
        assert_eq!(
            frame_targets("<IFRAME height=1000 width=100% src=00_prestats.html frameborder=0></IFRAME>"),
            vec!["00_prestats.html"]
        );
        assert_eq!(frame_targets("<iframe src=\"a.html\" >"), vec!["a.html"]);
        assert!(frame_targets("<iframe src=a.html>").is_empty());
        assert!(frame_targets("<p>src=a.html </p>").is_empty());
    }

    #[test]
    fn test_normalize_dir_name() {
        assert_eq!(normalize_dir_name("melodic"), "melodic/");
        assert_eq!(normalize_dir_name("melodic/"), "melodic/");
        assert_eq!(normalize_dir_name(""), "");
    }

    #[test]
    fn test_frame_key() {
        assert_eq!(frame_key(Path::new("a/./b/../c.html")), PathBuf::from("a/c.html"));
        assert_eq!(frame_key(Path::new("../c.html")), PathBuf::from("../c.html"));
    }

    #[test]
    fn test_missing_top_level_file() {
        let content = rewriter(MemoryFileSource::new())
            .modified_file_content(Path::new("nope/report.html"), "nope")
            .unwrap();
        assert!(content.is_missing());
    }

    #[test]
    fn test_empty_file_is_not_missing() {
        let content = rewriter(MemoryFileSource::new().with_file("d/empty.html", ""))
            .modified_file_content(Path::new("d/empty.html"), "d")
            .unwrap();
        assert_eq!(content, FrameContent::Lines(Vec::new()));
    }

    #[test]
    fn test_lines_rewritten_in_order() {
        let source = MemoryFileSource::new().with_file(
            "d/report.html",
            "<HTML><TITLE>MELODIC</TITLE>\n<a href=\"log.html\">Log</a>\n<img src=\"ic1.png\">\n</HTML>",
        );
        let lines = rewriter(source)
            .modified_file_content(Path::new("d/report.html"), "d")
            .unwrap()
            .into_lines();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "");
        assert_eq!(
            lines[1],
            "<a href=\"./42?file_name=d/log.html#file_content\">Log</a>"
        );
        assert!(lines[2].starts_with("<img src=\"42/content?arguments=study/d/ic1.png&content_loader="));
        assert_eq!(lines[3], "");
    }

    #[test]
    fn test_iframe_spliced_in_place() {
        let source = MemoryFileSource::new()
            .with_file("d/report.html", "before\n<IFRAME src=inner.html frameborder=0></IFRAME>\nafter")
            .with_file("d/inner.html", "<body>\ninner one\ninner two\n</body>");
        let lines = rewriter(source)
            .modified_file_content(Path::new("d/report.html"), "d")
            .unwrap()
            .into_lines();

        assert_eq!(lines, vec!["before", "", "inner one", "inner two", "", "after"]);
    }

    #[test]
    fn test_missing_frame_contributes_nothing() {
        let source = MemoryFileSource::new()
            .with_file("d/report.html", "a\n<iframe src=gone.html >\nb");
        let lines = rewriter(source)
            .modified_file_content(Path::new("d/report.html"), "d")
            .unwrap()
            .into_lines();

        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_self_referencing_frame_is_cut() {
        let source = MemoryFileSource::new()
            .with_file("d/loop.html", "top\n<iframe src=./loop.html >\nbottom");
        let lines = rewriter(source)
            .modified_file_content(Path::new("d/loop.html"), "d")
            .unwrap()
            .into_lines();

        assert_eq!(lines, vec!["top", "bottom"]);
    }

    #[test]
    fn test_frame_depth_limit() {
        let source = MemoryFileSource::new()
            .with_file("d/1.html", "one\n<iframe src=2.html >")
            .with_file("d/2.html", "two\n<iframe src=3.html >")
            .with_file("d/3.html", "three");
        let settings = RewriteSettings {
            max_frame_depth: 2,
            ..RewriteSettings::default()
        };
        let lines = rewriter(source)
            .with_settings(settings)
            .modified_file_content(Path::new("d/1.html"), "d")
            .unwrap()
            .into_lines();

        assert_eq!(lines, vec!["one", "two"]);
    }

    #[test]
    fn test_same_frame_twice_is_not_a_cycle() {
        let source = MemoryFileSource::new()
            .with_file("d/report.html", "<iframe src=part.html >\n<iframe src=part.html >")
            .with_file("d/part.html", "part");
        let lines = rewriter(source)
            .modified_file_content(Path::new("d/report.html"), "d")
            .unwrap()
            .into_lines();

        assert_eq!(lines, vec!["part", "part"]);
    }
}
