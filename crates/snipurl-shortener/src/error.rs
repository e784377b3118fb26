use snipurl_core::StorageError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ShortenError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("invalid alias: {0}")]
    InvalidAlias(String),
    #[error("alias already exists: {0}")]
    AliasTaken(String),
    #[error("could not allocate an unused short code")]
    AllocationExhausted,
    #[error(transparent)]
    Storage(#[from] StorageError),
}
