use serde::{Deserialize, Serialize};

/// Body of `POST /api/shorten`. Both fields are optional at the wire level;
/// the handler decides what a missing or empty value means.
#[derive(Debug, Deserialize)]
pub struct CreateLinkRequest {
    pub url: Option<String>,
    pub alias: Option<String>,
}

/// Success envelope for `POST /api/shorten`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLinkResponse {
    pub short_url: String,
    pub code: String,
}

/// Body of `POST /api/admin/verify`.
#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub password: Option<String>,
}

/// Success envelope for `POST /api/admin/verify`.
#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub success: bool,
}
