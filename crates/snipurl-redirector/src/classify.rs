use snipurl_core::ShortCode;

/// First path segments that can never be short codes. These belong to the
/// API and to well-known crawler and asset endpoints.
const RESERVED_NAMES: &[&str] = &["api", "favicon", "robots", "sitemap", "_nuxt", "__nuxt"];

/// Decides whether a request path is a candidate short-code lookup.
///
/// Returns the code for paths shaped like `/{code}`. Everything else falls
/// through to a plain 404: the root, multi-segment paths, reserved names,
/// names with a leading underscore or a dot (asset-style requests) and
/// anything outside the short-code character class. The path is matched
/// as received; the short-code alphabet never needs percent-encoding.
pub fn classify_path(path: &str) -> Option<ShortCode> {
    let candidate = path.trim_matches('/');
    if candidate.is_empty() || candidate.contains('/') {
        return None;
    }
    if candidate.starts_with('_') || candidate.contains('.') {
        return None;
    }
    if RESERVED_NAMES.contains(&candidate) {
        return None;
    }
    ShortCode::parse(candidate).ok()
}
