use snipurl_core::UrlRecord;
use snipurl_storage::UrlRepository;
use tracing::info;
use url::Url;

use crate::allocator::CodeAllocator;
use crate::error::ShortenError;

/// Front door for link creation.
///
/// Validates the target URL, allocates a code and persists the record. The
/// repository's conditional write is the authoritative uniqueness check;
/// losing that race surfaces as an error, never as a silent overwrite of
/// someone else's link.
#[derive(Debug, Clone)]
pub struct ShortenerService {
    repository: UrlRepository,
    allocator: CodeAllocator,
}

impl ShortenerService {
    pub fn new(repository: UrlRepository) -> Self {
        let allocator = CodeAllocator::new(repository.clone());
        Self {
            repository,
            allocator,
        }
    }

    /// Shortens `original_url`, under `alias` when the caller chose one.
    ///
    /// Returns the freshly stored record.
    pub async fn shorten(
        &self,
        original_url: &str,
        alias: Option<&str>,
    ) -> Result<UrlRecord, ShortenError> {
        validate_url(original_url)?;

        let code = self.allocator.allocate(alias).await?;
        let alias_code = alias.is_some().then(|| code.clone());
        let record = UrlRecord::new(code, original_url, alias_code);

        if self.repository.put_if_absent(&record).await? {
            info!(code = %record.code, custom_alias = alias.is_some(), "Shortened URL");
            return Ok(record);
        }

        // Someone claimed the code between the availability check and the
        // write. For an alias that is an ordinary conflict; for a generated
        // code it means the generator is out of luck this request.
        match alias {
            Some(taken) => Err(ShortenError::AliasTaken(taken.to_owned())),
            None => Err(ShortenError::AllocationExhausted),
        }
    }
}

/// Accepts absolute `http`/`https` URLs only.
fn validate_url(raw: &str) -> Result<(), ShortenError> {
    let parsed = Url::parse(raw).map_err(|e| ShortenError::InvalidUrl(format!("{raw:?}: {e}")))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ShortenError::InvalidUrl(format!(
            "scheme must be http or https, got {:?}",
            parsed.scheme()
        )));
    }
    if !parsed.has_host() {
        return Err(ShortenError::InvalidUrl(format!("{raw:?} has no host")));
    }
    Ok(())
}
