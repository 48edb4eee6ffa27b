pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, OutputFormat};

pub use adapters::{LocalFileSource, MemoryFileSource};
pub use config::{TomlConfig, ViewerOptions};
pub use core::{engine::ViewerEngine, rewriter::FrameRewriter};
pub use domain::model::{FrameContent, RenderedFrame, RewriteSettings, ViewerContext};
pub use utils::error::{Result, ViewerError};
