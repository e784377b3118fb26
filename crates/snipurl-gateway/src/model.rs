pub mod url;

pub use self::url::{CreateLinkRequest, CreateLinkResponse, VerifyRequest, VerifyResponse};

use serde::Serialize;

/// Body of `GET /health`.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}
