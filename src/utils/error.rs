use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for '{field}': {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration field: {field}")]
    MissingConfigError { field: String },
}

impl ViewerError {
    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            ViewerError::IoError(e) => format!("Could not read or write a file: {}", e),
            ViewerError::SerializationError(e) => format!("Could not encode the output: {}", e),
            ViewerError::TomlError(_) => "The configuration file is not valid TOML".to_string(),
            ViewerError::ConfigError { message } => message.clone(),
            ViewerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Setting '{}' is invalid: {}", field, reason)
            }
            ViewerError::MissingConfigError { field } => {
                format!("Setting '{}' is required", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ViewerError::IoError(_) => "Check that the path exists and is readable",
            ViewerError::SerializationError(_) => "Try the plain text output format",
            ViewerError::TomlError(_) | ViewerError::ConfigError { .. } => {
                "Fix the configuration file syntax and try again"
            }
            ViewerError::InvalidConfigValueError { .. } => {
                "Correct the value in the configuration file or on the command line"
            }
            ViewerError::MissingConfigError { .. } => {
                "Provide the setting in the [viewer] section or as a command-line flag"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ViewerError>;
