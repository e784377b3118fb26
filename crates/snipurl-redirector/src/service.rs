use std::sync::Arc;

use dashmap::DashMap;
use snipurl_core::{Result, ShortCode, UrlRecord};
use snipurl_storage::UrlRepository;
use tokio::sync::Mutex;
use tracing::{debug, trace};

/// Resolves short codes and counts the click.
///
/// A successful resolution increments the stored click counter before the
/// caller sees the record. The read-modify-write is serialized per code
/// through a lock registry, so concurrent hits on one link do not lose
/// counts while hits on different links never contend. A registry entry
/// lives only while resolvers hold it; once the last one lets go the entry
/// is dropped, so lookups of nonexistent codes leave nothing behind.
#[derive(Debug, Clone)]
pub struct RedirectorService {
    repository: UrlRepository,
    locks: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl RedirectorService {
    pub fn new(repository: UrlRepository) -> Self {
        Self {
            repository,
            locks: Arc::new(DashMap::new()),
        }
    }

    /// Looks up `code`, records the click and returns the updated record.
    ///
    /// `Ok(None)` means no such link exists. A storage failure propagates
    /// unchanged; a redirect is never produced without its click counted.
    pub async fn resolve_and_count(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        trace!(code = %code, "Resolving short code");

        let lock = self.lock_for(code);
        let result = {
            let _guard = lock.lock().await;
            self.count_click(code).await
        };
        drop(lock);

        // Trim the registry entry unless another resolver already holds it.
        // `remove_if` takes the shard lock, so no clone can slip in between
        // the count check and the removal.
        self.locks
            .remove_if(code.as_str(), |_, entry| Arc::strong_count(entry) == 1);
        result
    }

    async fn count_click(&self, code: &ShortCode) -> Result<Option<UrlRecord>> {
        let Some(mut record) = self.repository.get(code).await? else {
            trace!(code = %code, "Short code not found");
            return Ok(None);
        };

        record.clicks += 1;
        self.repository.put(&record).await?;

        debug!(
            code = %code,
            url = %record.original_url,
            clicks = record.clicks,
            "Resolved short code"
        );
        Ok(Some(record))
    }

    fn lock_for(&self, code: &ShortCode) -> Arc<Mutex<()>> {
        self.locks.entry(code.as_str().to_owned()).or_default().clone()
    }
}
