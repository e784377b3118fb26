use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use snipurl_core::UrlRecord;

use crate::error::{ApiError, Result};
use crate::model::{CreateLinkRequest, CreateLinkResponse};
use crate::state::AppState;

/// How many records listings return, newest first.
pub(crate) const RECENT_LIMIT: usize = 10;

pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateLinkRequest>,
) -> Result<Json<CreateLinkResponse>> {
    // An empty string counts as absent, for both fields.
    let url = request
        .url
        .as_deref()
        .filter(|url| !url.is_empty())
        .ok_or_else(|| ApiError::Validation("URL is required".to_owned()))?;
    let alias = request.alias.as_deref().filter(|alias| !alias.is_empty());

    let record = state.shortener().shorten(url, alias).await?;
    let short_url = format!("{}/{}", state.short_url_base(&headers), record.code);
    Ok(Json(CreateLinkResponse {
        short_url,
        code: record.code.to_string(),
    }))
}

pub async fn list_urls_handler(State(state): State<AppState>) -> Result<Json<Vec<UrlRecord>>> {
    let records = state.repository().recent(RECENT_LIMIT).await?;
    Ok(Json(records))
}
