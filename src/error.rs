use crate::config::ConfigError;
use thiserror::Error;

/// Errors raised by the loaders and the command-line harness.
///
/// Rule evaluation itself never fails: collection errors become
/// `Status::Unknown` findings instead of an `Err`.
#[derive(Error, Debug)]
pub enum AuditError {
    #[error("Cache snapshot not found: {0}")]
    CacheNotFound(String),

    #[error("Failed to read cache snapshot: {path}")]
    ReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse cache snapshot: {path}")]
    CacheParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid cache snapshot: {0}")]
    InvalidCache(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    #[error("Blocking evaluation thread panicked: {0}")]
    BlockingThread(String),
}

pub type Result<T> = std::result::Result<T, AuditError>;
