pub mod engine;
pub mod images;
pub mod links;
pub mod rewriter;
pub mod tags;

pub use crate::domain::model::{FrameContent, RenderedFrame, RewriteSettings, ViewerContext};
pub use crate::domain::ports::FileSource;
pub use crate::utils::error::Result;
