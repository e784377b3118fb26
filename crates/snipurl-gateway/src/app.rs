use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    admin_list_urls_handler, health_handler, list_urls_handler, redirect_handler, shorten_handler,
    verify_password_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/api",
                Router::new()
                    .route("/shorten", post(shorten_handler))
                    .route("/urls", get(list_urls_handler))
                    .route("/admin/urls", get(admin_list_urls_handler))
                    .route("/admin/verify", post(verify_password_handler)),
            )
            // Everything else is a candidate short-code path.
            .fallback(redirect_handler)
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }
}
