use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use snipurl_core::UrlRecord;
use tracing::warn;

use crate::error::{ApiError, Result};
use crate::handlers::url::RECENT_LIMIT;
use crate::model::{VerifyRequest, VerifyResponse};
use crate::state::AppState;

/// Header carrying the admin shared secret.
const ADMIN_AUTH_HEADER: &str = "x-admin-auth";

pub async fn admin_list_urls_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UrlRecord>>> {
    let authorized = headers
        .get(ADMIN_AUTH_HEADER)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|candidate| state.is_admin_password(candidate));
    if !authorized {
        warn!("Rejected admin listing request");
        return Err(ApiError::Unauthorized("Invalid password".to_owned()));
    }

    let records = state.repository().recent(RECENT_LIMIT).await?;
    Ok(Json(records))
}

pub async fn verify_password_handler(
    State(state): State<AppState>,
    Json(request): Json<VerifyRequest>,
) -> Result<Json<VerifyResponse>> {
    let valid = request
        .password
        .as_deref()
        .is_some_and(|candidate| state.is_admin_password(candidate));
    if !valid {
        return Err(ApiError::Unauthorized("Invalid password".to_owned()));
    }
    Ok(Json(VerifyResponse { success: true }))
}
