//! Redirect resolution for snipurl.
//!
//! Request-path classification and the click-counted lookup behind the
//! catch-all route.

pub mod classify;
pub mod service;

pub use classify::classify_path;
pub use service::RedirectorService;
