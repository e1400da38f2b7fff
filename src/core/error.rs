

use thiserror::Error;

use crate::db::SourceError;


#[derive(Error, Debug)]
pub enum RoundupError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Data source failure: {0}")]
    Source(#[from] SourceError),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for RoundupError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}


pub type Result<T> = std::result::Result<T, RoundupError>;
