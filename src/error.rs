use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdComplianceError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to access file: {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Structurally invalid ad snapshot. Evaluation never starts on one.
    #[error("Invalid ad: {0}")]
    InvalidAd(String),

    #[error("Duplicate rule id: {0}")]
    DuplicateRule(String),

    #[error("Unknown rule id: {0}")]
    UnknownRule(String),

    #[error("Invalid color '{0}': expected #RGB or #RRGGBB")]
    InvalidColor(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl AdComplianceError {
    /// Short category label used as the prefix of CLI error lines.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) | Self::DuplicateRule(_) | Self::UnknownRule(_) => "Config",
            Self::TomlParse(_) => "Syntax",
            Self::InvalidAd(_) | Self::InvalidColor(_) | Self::JsonParse(_) => "Input",
            Self::FileAccess { .. } | Self::Io(_) => "IO",
        }
    }
}

pub type Result<T> = std::result::Result<T, AdComplianceError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
