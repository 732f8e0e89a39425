//! Error types for the key-value store.

use thiserror::Error;

/// Main error type for store and shell operations.
///
/// The transactional core never fails on its own: commit and rollback report
/// a missing transaction with `false`, and lookup misses are `None`. This type
/// covers the layers around it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("no transaction")]
    NoTransaction,

    #[error("{command} should have exactly {expected}")]
    WrongArity {
        command: &'static str,
        expected: &'static str,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Config(e.to_string())
    }
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
