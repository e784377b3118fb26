use std::sync::Arc;

use snipurl_core::{KvStore, Result};
use tracing::{info, warn};

pub mod memory;
pub mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::{RedisConfig, RedisStore};

/// Which backend [`select_backend`] chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Redis,
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Redis => write!(f, "redis"),
            BackendKind::Memory => write!(f, "in-memory"),
        }
    }
}

/// Selects and connects the process-wide store.
///
/// The durable backend is used only when both the URL and the auth token
/// are configured; anything less falls back to the in-process map, whose
/// contents are lost on restart. The decision is made once here, never
/// per request.
pub async fn select_backend(
    redis_url: Option<String>,
    redis_token: Option<String>,
) -> Result<(Arc<dyn KvStore>, BackendKind)> {
    match (redis_url, redis_token) {
        (Some(url), Some(token)) => {
            let config = RedisConfig::builder().url(url).token(token).build();
            let store = RedisStore::connect(config).await?;
            info!(backend = %BackendKind::Redis, "Connected durable key-value backend");
            Ok((Arc::new(store), BackendKind::Redis))
        }
        (url, token) => {
            warn!(
                backend = %BackendKind::Memory,
                redis_url_set = url.is_some(),
                redis_token_set = token.is_some(),
                "Durable-store credentials incomplete; links will not survive a restart"
            );
            Ok((Arc::new(MemoryStore::new()), BackendKind::Memory))
        }
    }
}
