use crate::shortcode::ShortCode;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// The stored association between a short code and its target URL.
///
/// Field names follow the camelCase wire format of the JSON documents kept
/// in the key-value store, so records written by earlier deployments parse
/// unchanged. `clicks` is the only field that mutates after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    /// The unique short code; also the storage key.
    pub code: ShortCode,
    /// The redirect target. Immutable once created.
    pub original_url: String,
    /// Present only when the code was chosen by the caller; equals `code`
    /// in that case.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<ShortCode>,
    /// Creation time; used only to order listings.
    pub created_at: Timestamp,
    /// Number of successful redirects served for this code.
    pub clicks: u64,
}

impl UrlRecord {
    /// Creates a fresh record with `clicks` at zero and `created_at` now.
    pub fn new(code: ShortCode, original_url: impl Into<String>, alias: Option<ShortCode>) -> Self {
        Self {
            code,
            original_url: original_url.into(),
            alias,
            created_at: Timestamp::now(),
            clicks: 0,
        }
    }
}
