use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use snipurl_core::StorageError;
use snipurl_shortener::ShortenError;
use thiserror::Error;
use tracing::error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Boundary error: the single place service errors become status codes.
///
/// Messages on the 4xx variants are client-facing and go out verbatim in
/// the `{"message": ...}` envelope. Storage details stay in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("could not allocate an unused short code")]
    Allocation,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Allocation => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Storage(StorageError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Storage(StorageError::Timeout(_)) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ShortenError> for ApiError {
    fn from(err: ShortenError) -> Self {
        match err {
            ShortenError::InvalidUrl(_) => ApiError::Validation("Invalid URL format".to_owned()),
            ShortenError::InvalidAlias(_) => ApiError::Validation(
                "Alias can only contain letters, numbers, hyphens and underscores".to_owned(),
            ),
            ShortenError::AliasTaken(_) => {
                ApiError::Conflict("This alias is already taken".to_owned())
            }
            ShortenError::AllocationExhausted => ApiError::Allocation,
            ShortenError::Storage(err) => ApiError::Storage(err),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = %status, error = %self, "Request failed");
        }
        let message = match &self {
            ApiError::Storage(_) => "Storage backend error".to_owned(),
            other => other.to_string(),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}
