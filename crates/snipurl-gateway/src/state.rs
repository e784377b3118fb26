use axum::http::{header, HeaderMap};
use snipurl_redirector::RedirectorService;
use snipurl_shortener::ShortenerService;
use snipurl_storage::UrlRepository;
use subtle::ConstantTimeEq;

/// Shared state behind every handler.
#[derive(Clone)]
pub struct AppState {
    repository: UrlRepository,
    shortener: ShortenerService,
    redirector: RedirectorService,
    admin_password: String,
    public_base_url: Option<String>,
}

impl AppState {
    pub fn new(
        repository: UrlRepository,
        admin_password: impl Into<String>,
        public_base_url: Option<String>,
    ) -> Self {
        let shortener = ShortenerService::new(repository.clone());
        let redirector = RedirectorService::new(repository.clone());
        Self {
            repository,
            shortener,
            redirector,
            admin_password: admin_password.into(),
            public_base_url: public_base_url.map(|base| base.trim_end_matches('/').to_owned()),
        }
    }

    pub fn repository(&self) -> &UrlRepository {
        &self.repository
    }

    pub fn shortener(&self) -> &ShortenerService {
        &self.shortener
    }

    pub fn redirector(&self) -> &RedirectorService {
        &self.redirector
    }

    /// Compares `candidate` against the admin secret in constant time.
    pub fn is_admin_password(&self, candidate: &str) -> bool {
        candidate
            .as_bytes()
            .ct_eq(self.admin_password.as_bytes())
            .into()
    }

    /// Base for returned short URLs: the configured public base when set,
    /// otherwise derived from the forwarded protocol and `Host` header.
    pub fn short_url_base(&self, headers: &HeaderMap) -> String {
        if let Some(base) = &self.public_base_url {
            return base.clone();
        }
        let protocol = headers
            .get("x-forwarded-proto")
            .and_then(|value| value.to_str().ok())
            .unwrap_or("https");
        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost:8080");
        format!("{protocol}://{host}")
    }
}
