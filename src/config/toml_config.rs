use crate::domain::model::RewriteSettings;
use crate::utils::error::{Result, ViewerError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const MAX_FRAME_DEPTH_LIMIT: usize = 256;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub viewer: Option<ViewerSection>,
    pub rewrite: Option<RewriteSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerSection {
    pub owner_id: Option<String>,
    pub collection_name: Option<String>,
    pub base_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteSection {
    pub logo_file_name: Option<String>,
    pub logo_base_url: Option<String>,
    pub logo_width: Option<u32>,
    pub image_loader_arguments: Option<String>,
    pub max_frame_depth: Option<usize>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ViewerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);
        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${FSL_IMG_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> =
            LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("env var pattern"));

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn viewer(&self) -> ViewerSection {
        self.viewer.clone().unwrap_or_default()
    }

    /// Settings from the `[rewrite]` section, defaults for anything unset.
    pub fn rewrite_settings(&self) -> RewriteSettings {
        let defaults = RewriteSettings::default();
        let Some(section) = &self.rewrite else {
            return defaults;
        };

        RewriteSettings {
            logo_file_name: section
                .logo_file_name
                .clone()
                .unwrap_or(defaults.logo_file_name),
            logo_base_url: section
                .logo_base_url
                .clone()
                .unwrap_or(defaults.logo_base_url),
            logo_width: section.logo_width.unwrap_or(defaults.logo_width),
            image_loader_arguments: section
                .image_loader_arguments
                .clone()
                .unwrap_or(defaults.image_loader_arguments),
            max_frame_depth: section.max_frame_depth.unwrap_or(defaults.max_frame_depth),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(viewer) = &self.viewer {
            if let Some(owner_id) = &viewer.owner_id {
                validation::validate_non_empty_string("viewer.owner_id", owner_id)?;
            }
            if let Some(collection_name) = &viewer.collection_name {
                validation::validate_non_empty_string("viewer.collection_name", collection_name)?;
            }
            if let Some(base_path) = &viewer.base_path {
                validation::validate_path("viewer.base_path", &base_path.to_string_lossy())?;
            }
        }

        let settings = self.rewrite_settings();
        validation::validate_file_name("rewrite.logo_file_name", &settings.logo_file_name)?;
        validation::validate_url("rewrite.logo_base_url", &settings.logo_base_url)?;
        validation::validate_range("rewrite.logo_width", settings.logo_width, 1, 4096)?;
        validation::validate_range(
            "rewrite.max_frame_depth",
            settings.max_frame_depth,
            1,
            MAX_FRAME_DEPTH_LIMIT,
        )?;

        Ok(())
    }
}
