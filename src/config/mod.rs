pub mod toml_config;

use crate::adapters::LocalFileSource;
use crate::core::rewriter::FrameRewriter;
use crate::domain::model::{RewriteSettings, ViewerContext};
use std::path::PathBuf;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

pub use toml_config::TomlConfig;

/// Everything needed to build a rewriter, after merging flags and file config.
#[derive(Debug, Clone)]
pub struct ViewerOptions {
    pub context: ViewerContext,
    pub settings: RewriteSettings,
    pub base_path: PathBuf,
}

impl ViewerOptions {
    pub fn rewriter(&self) -> FrameRewriter<LocalFileSource> {
        FrameRewriter::new(LocalFileSource::new(&self.base_path), self.context.clone())
            .with_settings(self.settings.clone())
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Text,
    Json,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "melodic-viewer")]
#[command(about = "Rewrites FSL Melodic report pages for display inside a viewer pane")]
pub struct CliConfig {
    /// HTML page to rewrite
    pub file: PathBuf,

    /// Directory of the page inside the collection
    #[arg(long)]
    pub dir_name: String,

    /// Identifier of the owning resource, used in rewritten URLs
    #[arg(long)]
    pub owner_id: Option<String>,

    /// Collection name, prefixed to image paths
    #[arg(long)]
    pub collection: Option<String>,

    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory relative page paths are resolved against
    #[arg(long)]
    pub base_path: Option<PathBuf>,

    /// Write the result here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Override rewrite.max_frame_depth
    #[arg(long)]
    pub max_frame_depth: Option<usize>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn load_toml(&self) -> Result<TomlConfig> {
        match &self.config {
            Some(path) => {
                tracing::debug!("Loading configuration from {}", path.display());
                TomlConfig::from_file(path)
            }
            None => Ok(TomlConfig::default()),
        }
    }

    /// Flags win over the file; owner id and collection must come from one of them.
    pub fn resolve(&self) -> Result<ViewerOptions> {
        let toml = self.load_toml()?;
        toml.validate()?;
        let viewer = toml.viewer();

        let owner_id = self.owner_id.clone().or(viewer.owner_id);
        let owner_id = validation::validate_required_field("viewer.owner_id", &owner_id)?;
        let collection_name = self.collection.clone().or(viewer.collection_name);
        let collection_name =
            validation::validate_required_field("viewer.collection_name", &collection_name)?;

        let mut settings = toml.rewrite_settings();
        if let Some(depth) = self.max_frame_depth {
            validation::validate_range(
                "max_frame_depth",
                depth,
                1,
                toml_config::MAX_FRAME_DEPTH_LIMIT,
            )?;
            settings.max_frame_depth = depth;
        }

        Ok(ViewerOptions {
            context: ViewerContext::new(owner_id.as_str(), collection_name.as_str()),
            settings,
            base_path: self
                .base_path
                .clone()
                .or(viewer.base_path)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("file", &self.file.to_string_lossy())?;
        if let Some(owner_id) = &self.owner_id {
            validation::validate_non_empty_string("owner_id", owner_id)?;
        }
        if let Some(collection) = &self.collection {
            validation::validate_non_empty_string("collection", collection)?;
        }
        if let Some(output) = &self.output {
            validation::validate_path("output", &output.to_string_lossy())?;
        }
        Ok(())
    }
}
