use thiserror::Error;
use uuid::Uuid;

use crate::config::ConfigError;

/// Error type shared by record normalization, storage, and configuration.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Record not found: {0}")]
    RecordNotFound(Uuid),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, LedgerError>;

impl From<ConfigError> for LedgerError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => LedgerError::Io(io),
            ConfigError::Serde(message) | ConfigError::Invalid(message) => {
                LedgerError::Config(message)
            }
        }
    }
}
