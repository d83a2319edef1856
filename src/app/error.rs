use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum PostboardError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Response decoding error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("User not found: {0}")]
    UserNotFound(u64),
}

pub type Result<T> = std::result::Result<T, PostboardError>;
