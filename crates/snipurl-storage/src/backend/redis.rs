use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};
use snipurl_core::error::StorageError;
use snipurl_core::{KvStore, Result};
use tracing::debug;
use typed_builder::TypedBuilder;

/// Connection settings for the durable Redis backend.
#[derive(Debug, Clone, TypedBuilder)]
pub struct RedisConfig {
    /// Server URL, e.g. `redis://host:6379` or `rediss://host:6380`.
    #[builder(setter(into))]
    pub url: String,
    /// Auth token, applied as the connection password.
    #[builder(default, setter(into, strip_option))]
    pub token: Option<String>,
    /// Upper bound for any single operation, connect included.
    #[builder(default = Duration::from_secs(5))]
    pub op_timeout: Duration,
}

/// Redis implementation of the [`KvStore`] contract.
///
/// All operations go through a [`ConnectionManager`], which transparently
/// reconnects after transient failures, and are bounded by the configured
/// operation timeout so a stalled server surfaces as
/// [`StorageError::Timeout`] instead of hanging a request.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisStore {
    /// Connects to the configured server and verifies the connection with
    /// a `PING` before handing the store out.
    pub async fn connect(config: RedisConfig) -> Result<Self> {
        let mut info = config
            .url
            .as_str()
            .into_connection_info()
            .map_err(map_redis_error)?;
        if let Some(token) = config.token {
            let settings = info.redis_settings().clone().set_password(token);
            info = info.set_redis_settings(settings);
        }

        let client = redis::Client::open(info).map_err(map_redis_error)?;
        let conn = match tokio::time::timeout(config.op_timeout, client.get_connection_manager())
            .await
        {
            Ok(conn) => conn.map_err(map_redis_error)?,
            Err(_) => {
                return Err(StorageError::Timeout(format!(
                    "CONNECT exceeded {:?}",
                    config.op_timeout
                )))
            }
        };

        let store = Self {
            conn,
            op_timeout: config.op_timeout,
        };
        let mut conn = store.conn.clone();
        store
            .timed("PING", redis::cmd("PING").query_async::<()>(&mut conn))
            .await?;
        debug!("Verified Redis connection");
        Ok(store)
    }

    /// Runs one Redis future under the operation timeout.
    async fn timed<T>(
        &self,
        op: &'static str,
        fut: impl Future<Output = redis::RedisResult<T>>,
    ) -> Result<T> {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(map_redis_error),
            Err(_) => Err(StorageError::Timeout(format!(
                "{op} exceeded {:?}",
                self.op_timeout
            ))),
        }
    }
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("op_timeout", &self.op_timeout)
            .finish_non_exhaustive()
    }
}

fn map_redis_error(err: redis::RedisError) -> StorageError {
    let message = err.to_string();

    if err.is_timeout() {
        StorageError::Timeout(message)
    } else if err.is_io_error() || err.is_connection_refusal() || err.is_connection_dropped() {
        StorageError::Unavailable(message)
    } else if err.kind() == redis::ErrorKind::UnexpectedReturnType {
        StorageError::InvalidData(message)
    } else {
        StorageError::Operation(message)
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.conn.clone();
        self.timed("GET", conn.get::<_, Option<String>>(key)).await
    }

    async fn set(&self, key: &str, value: String) -> Result<()> {
        let mut conn = self.conn.clone();
        self.timed("SET", conn.set::<_, _, ()>(key, value)).await
    }

    async fn set_if_absent(&self, key: &str, value: String) -> Result<bool> {
        // SET NX claims the key atomically on the server, so concurrent
        // writers across processes agree on a single winner.
        let mut conn = self.conn.clone();
        self.timed("SET NX", conn.set_nx::<_, _, bool>(key, value))
            .await
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        // The prefix is used verbatim in a KEYS glob; callers pass fixed
        // namespaces without pattern metacharacters.
        let mut conn = self.conn.clone();
        let keys: Vec<String> = self
            .timed("KEYS", conn.keys(format!("{prefix}*")))
            .await?;
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        // MGET with zero keys is a protocol error, hence the guard above.
        let values: Vec<Option<String>> = self.timed("MGET", conn.mget(&keys)).await?;
        Ok(values.into_iter().flatten().collect())
    }
}
