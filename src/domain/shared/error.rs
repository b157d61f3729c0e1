//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The backing store failed to read or write
    #[error("Storage error: {0}")]
    Storage(String),

    /// A referenced call record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Malformed input rejected before it reaches the store
    #[error("{0}")]
    Validation(String),
}

impl DomainError {
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn row_not_found(id: i64) -> Self {
        Self::NotFound(format!("Row {} not found", id))
    }
}
