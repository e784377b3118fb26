use nanoid::nanoid;
use snipurl_core::ShortCode;
use snipurl_storage::UrlRepository;
use tracing::warn;

use crate::error::ShortenError;

/// Length of auto-generated short codes.
pub const GENERATED_CODE_LEN: usize = 6;

/// How many fresh candidates to try before giving up on generation.
const MAX_ATTEMPTS: usize = 5;

/// Picks the short code for a new link.
///
/// Generated codes are drawn from nanoid's URL-safe alphabet, which is a
/// subset of [`ShortCode`]'s character class; candidates that would land on
/// an internal path (leading underscore) are redrawn. Caller-chosen aliases
/// are validated against the character class before anything else.
///
/// Existence checks here are advisory: the authoritative claim happens when
/// the record is persisted with a conditional write, so a collision that
/// slips past this check still cannot overwrite an existing link.
#[derive(Debug, Clone)]
pub struct CodeAllocator {
    repository: UrlRepository,
}

impl CodeAllocator {
    pub fn new(repository: UrlRepository) -> Self {
        Self { repository }
    }

    /// Allocates a code, honoring `alias` when one was requested.
    pub async fn allocate(&self, alias: Option<&str>) -> Result<ShortCode, ShortenError> {
        match alias {
            Some(alias) => self.claim_alias(alias).await,
            None => self.generate().await,
        }
    }

    async fn claim_alias(&self, alias: &str) -> Result<ShortCode, ShortenError> {
        let code =
            ShortCode::parse(alias).map_err(|e| ShortenError::InvalidAlias(e.to_string()))?;
        if self.repository.exists(&code).await? {
            return Err(ShortenError::AliasTaken(code.to_string()));
        }
        Ok(code)
    }

    async fn generate(&self) -> Result<ShortCode, ShortenError> {
        for attempt in 1..=MAX_ATTEMPTS {
            let candidate = nanoid!(GENERATED_CODE_LEN);
            // A leading underscore marks internal paths at resolve time, so
            // such a code would never be reachable. Redraw instead.
            if candidate.starts_with('_') {
                continue;
            }
            let code = ShortCode::new_unchecked(candidate);
            if !self.repository.exists(&code).await? {
                return Ok(code);
            }
            warn!(code = %code, attempt, "Generated short code collided; retrying");
        }
        Err(ShortenError::AllocationExhausted)
    }
}
