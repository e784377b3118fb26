use thiserror::Error;

/// Result type for key-value store operations.
pub type Result<T> = std::result::Result<T, StorageError>;

/// Failures surfaced by a key-value backend.
///
/// A missing key is not an error (`get` returns `Ok(None)`); these variants
/// cover the backend itself misbehaving. Callers must never collapse them
/// into "record absent".
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
    #[error("storage operation timed out: {0}")]
    Timeout(String),
    #[error("stored data is invalid: {0}")]
    InvalidData(String),
    #[error("storage operation failed: {0}")]
    Operation(String),
}
