//! Storage backends for snipurl.
//!
//! Two interchangeable [`KvStore`] implementations, a durable Redis backend
//! and an in-process map, plus the typed [`UrlRepository`] the services
//! speak to. The backend is chosen exactly once at startup by
//! [`select_backend`]; everything downstream sees only the trait object and
//! cannot tell the difference.

pub mod backend;
pub mod repository;

pub use backend::{select_backend, BackendKind, MemoryStore, RedisConfig, RedisStore};
pub use repository::UrlRepository;
