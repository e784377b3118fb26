use crate::error::Result;
use async_trait::async_trait;

/// Uniform contract over the two interchangeable storage backends.
///
/// Values are opaque documents (JSON in practice); typed access lives in the
/// repository layer. Implementations must be safe for concurrent use, and
/// writes to distinct keys never disturb one another. Which backend sits
/// behind this trait is decided once at startup; nothing else in the system
/// may depend on the choice.
#[async_trait]
pub trait KvStore: Send + Sync + 'static {
    /// Fetches the value stored under `key`. A missing key is `Ok(None)`,
    /// never an error.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, overwriting any previous value.
    async fn set(&self, key: &str, value: String) -> Result<()>;

    /// Stores `value` under `key` only if the key is currently absent.
    /// Returns `true` when the write happened.
    async fn set_if_absent(&self, key: &str, value: String) -> Result<bool>;

    /// Returns the values of every key starting with `prefix`.
    ///
    /// May walk the whole keyspace on a remote backend; reserved for listing
    /// and admin surfaces, never the redirect path.
    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<String>>;
}
