//! HTTP boundary for snipurl.
//!
//! Routes, handlers and DTOs over the shortener and redirector services.
//! This is the only layer that turns service errors into status codes.

pub mod app;
pub mod error;
pub mod handlers;
pub mod model;
pub mod state;

pub use app::App;
pub use error::{ApiError, Result};
pub use state::AppState;
