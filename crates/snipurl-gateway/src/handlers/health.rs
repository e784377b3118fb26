use axum::Json;

use crate::model::HealthResponse;

/// Liveness endpoint. Answers without touching storage.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
