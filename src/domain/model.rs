use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGO_FILE_NAME: &str = "fsl-logo-big.jpg";
pub const DEFAULT_LOGO_BASE_URL: &str = "http://fsl.fmrib.ox.ac.uk/fsl/wiki_static/fsl/img";
pub const DEFAULT_LOGO_WIDTH: u32 = 165;
pub const DEFAULT_IMAGE_LOADER_ARGUMENTS: &str =
    "&content_loader=collection_file&content_viewer=off&viewer=image_file&viewer_userfile_class=ImageFile";
pub const DEFAULT_MAX_FRAME_DEPTH: usize = 32;

/// The resource that owns the rewritten pages.
///
/// `owner_id` is spliced verbatim into every viewer URL; `collection_name`
/// prefixes image paths served by the content endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerContext {
    pub owner_id: String,
    pub collection_name: String,
}

impl ViewerContext {
    pub fn new(owner_id: impl Into<String>, collection_name: impl Into<String>) -> Self {
        Self {
            owner_id: owner_id.into(),
            collection_name: collection_name.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteSettings {
    pub logo_file_name: String,
    pub logo_base_url: String,
    pub logo_width: u32,
    pub image_loader_arguments: String,
    pub max_frame_depth: usize,
}

impl RewriteSettings {
    /// Replacement tag for the local logo reference.
    pub fn logo_img_tag(&self) -> String {
        format!(
            "<img src=\"{}/{}\" width={}/>",
            self.logo_base_url.trim_end_matches('/'),
            self.logo_file_name,
            self.logo_width
        )
    }
}

impl Default for RewriteSettings {
    fn default() -> Self {
        Self {
            logo_file_name: DEFAULT_LOGO_FILE_NAME.to_string(),
            logo_base_url: DEFAULT_LOGO_BASE_URL.to_string(),
            logo_width: DEFAULT_LOGO_WIDTH,
            image_loader_arguments: DEFAULT_IMAGE_LOADER_ARGUMENTS.to_string(),
            max_frame_depth: DEFAULT_MAX_FRAME_DEPTH,
        }
    }
}

/// Result of rewriting one page.
///
/// `Missing` and an empty `Lines` are different answers: the first means the
/// file was not there, the second that it had nothing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameContent {
    Missing,
    Lines(Vec<String>),
}

impl FrameContent {
    pub fn is_missing(&self) -> bool {
        matches!(self, FrameContent::Missing)
    }

    pub fn lines(&self) -> &[String] {
        match self {
            FrameContent::Missing => &[],
            FrameContent::Lines(lines) => lines,
        }
    }

    pub fn into_lines(self) -> Vec<String> {
        match self {
            FrameContent::Missing => Vec::new(),
            FrameContent::Lines(lines) => lines,
        }
    }

    pub fn len(&self) -> usize {
        self.lines().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines().is_empty()
    }

    pub fn render(&self) -> String {
        self.lines().join("\n")
    }
}

/// Serialisable view of a rewritten page, as handed to the viewer pane.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderedFrame {
    pub file: String,
    pub dir_name: String,
    pub missing: bool,
    pub lines: Vec<String>,
}
