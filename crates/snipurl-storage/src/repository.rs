use std::sync::Arc;

use snipurl_core::error::StorageError;
use snipurl_core::{KvStore, Result, ShortCode, UrlRecord};
use tracing::trace;

/// Key namespace for URL records. Every record lives under `url:{code}`.
const KEY_PREFIX: &str = "url:";

fn record_key(code: &ShortCode) -> String {
    format!("{KEY_PREFIX}{}", code.as_str())
}

/// Typed access to [`UrlRecord`]s over the process-wide [`KvStore`].
///
/// The repository owns the key namespace, the JSON document format and
/// recency ordering; everything else is the backend's concern. A document
/// that fails to parse is reported as [`StorageError::InvalidData`] rather
/// than silently skipped, so corruption is visible instead of shrinking
/// listings.
#[derive(Clone)]
pub struct UrlRepository {
    store: Arc<dyn KvStore>,
}

impl UrlRepository {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Fetches the record stored under `code`.
    pub async fn get(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        trace!(code = %code, "Fetching URL record");
        let Some(raw) = self.store.get(&record_key(code)).await? else {
            return Ok(None);
        };
        decode(&raw).map(Some)
    }

    /// Returns whether a record exists under `code`.
    pub async fn exists(&self, code: &ShortCode) -> Result<bool> {
        Ok(self.store.get(&record_key(code)).await?.is_some())
    }

    /// Writes the record under its code, replacing any previous version.
    pub async fn put(&self, record: &UrlRecord) -> Result<()> {
        self.store
            .set(&record_key(&record.code), encode(record)?)
            .await
    }

    /// Persists a new record only if its code is still unclaimed. Returns
    /// `true` when this call won the slot.
    pub async fn put_if_absent(&self, record: &UrlRecord) -> Result<bool> {
        self.store
            .set_if_absent(&record_key(&record.code), encode(record)?)
            .await
    }

    /// The `limit` most recently created records, newest first.
    ///
    /// Walks every record in the namespace, so this serves listings only,
    /// never the redirect path.
    pub async fn recent(&self, limit: usize) -> Result<Vec<UrlRecord>> {
        let raw = self.store.list_by_prefix(KEY_PREFIX).await?;
        let mut records = raw
            .iter()
            .map(|doc| decode(doc))
            .collect::<Result<Vec<_>>>()?;
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        records.truncate(limit);
        Ok(records)
    }
}

impl std::fmt::Debug for UrlRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UrlRepository").finish_non_exhaustive()
    }
}

fn encode(record: &UrlRecord) -> Result<String> {
    serde_json::to_string(record)
        .map_err(|e| StorageError::Operation(format!("serializing record: {e}")))
}

fn decode(raw: &str) -> Result<UrlRecord> {
    serde_json::from_str(raw)
        .map_err(|e| StorageError::InvalidData(format!("malformed record document: {e}")))
}
