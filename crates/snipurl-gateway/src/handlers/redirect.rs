use axum::extract::State;
use axum::http::{header, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use snipurl_redirector::classify_path;

use crate::error::ApiError;
use crate::state::AppState;

/// Router fallback: the catch-all variant of short-code resolution.
///
/// Paths that do not classify as a short code get the same plain 404 a
/// router without this fallback would produce. A classified but unknown
/// code gets the explicit `URL not found` envelope. A hit becomes a
/// permanent redirect, after its click is persisted.
pub async fn redirect_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let Some(code) = classify_path(uri.path()) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.redirector().resolve_and_count(&code).await {
        // axum's `Redirect::permanent` answers 308; stored links answer 301.
        Ok(Some(record)) => (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, record.original_url)],
        )
            .into_response(),
        Ok(None) => ApiError::NotFound("URL not found".to_owned()).into_response(),
        Err(err) => ApiError::from(err).into_response(),
    }
}
