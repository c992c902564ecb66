use crate::content::ContentIssue;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid content: {0}")]
    InvalidContent(#[from] ContentIssue),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, PlayerError>;
