//! End-to-end tests over the full router, against the in-process backend.
//!
//! The final test repeats the core scenario against a live Redis server
//! when `SNIPURL_TEST_REDIS_URL` is set, and returns early otherwise.

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use jiff::ToSpan;
use serde_json::{json, Value};
use snipurl_core::{KvStore, Result, ShortCode, StorageError, UrlRecord};
use snipurl_gateway::{App, AppState};
use snipurl_storage::{MemoryStore, RedisConfig, RedisStore, UrlRepository};
use tower::ServiceExt;

const TEST_PASSWORD: &str = "test-password";

fn test_app() -> (UrlRepository, Router) {
    let repository = UrlRepository::new(Arc::new(MemoryStore::new()));
    let state = AppState::new(repository.clone(), TEST_PASSWORD, None);
    (repository, App::router(state))
}

async fn send_raw(router: &Router, request: Request<Body>) -> Response {
    router.clone().oneshot(request).await.unwrap()
}

async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = send_raw(router, request).await;
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::HOST, "snip.example")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn code(s: &str) -> ShortCode {
    ShortCode::new_unchecked(s)
}

#[tokio::test]
async fn shorten_redirect_and_count_end_to_end() {
    let (repository, app) = test_app();

    let (status, body) = send(
        &app,
        post_json("/api/shorten", json!({"url": "https://example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let short_code = body["code"].as_str().unwrap().to_owned();
    assert_eq!(short_code.len(), 6);
    assert_eq!(body["shortUrl"], format!("https://snip.example/{short_code}"));

    for _ in 0..2 {
        let response = send_raw(&app, get(&format!("/{short_code}"))).await;
        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(response.headers()[header::LOCATION], "https://example.com");
    }

    let stored = repository.get(&code(&short_code)).await.unwrap().unwrap();
    assert_eq!(stored.clicks, 2);
}

#[tokio::test]
async fn unknown_code_is_an_explicit_not_found() {
    let (_, app) = test_app();

    let (status, body) = send(&app, get("/unknown")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "URL not found");
}

/// Reads pass through, every write fails.
struct ReadOnlyStore(Arc<MemoryStore>);

#[async_trait]
impl KvStore for ReadOnlyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.0.get(key).await
    }

    async fn set(&self, _key: &str, _value: String) -> Result<()> {
        Err(StorageError::Unavailable("write refused".to_owned()))
    }

    async fn set_if_absent(&self, key: &str, value: String) -> Result<bool> {
        self.0.set_if_absent(key, value).await
    }

    async fn list_by_prefix(&self, prefix: &str) -> Result<Vec<String>> {
        self.0.list_by_prefix(prefix).await
    }
}

#[tokio::test]
async fn redirect_is_withheld_when_the_click_cannot_be_persisted() {
    let store = Arc::new(MemoryStore::new());
    UrlRepository::new(store.clone())
        .put(&UrlRecord::new(code("abc123"), "https://example.com", None))
        .await
        .unwrap();
    let repository = UrlRepository::new(Arc::new(ReadOnlyStore(store)));
    let app = App::router(AppState::new(repository, TEST_PASSWORD, None));

    let response = send_raw(&app, get("/abc123")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert!(response.headers().get(header::LOCATION).is_none());

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["message"], "Storage backend error");
}

#[tokio::test]
async fn missing_or_empty_url_is_rejected() {
    let (_, app) = test_app();

    for body in [json!({}), json!({"url": ""})] {
        let (status, payload) = send(&app, post_json("/api/shorten", body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(payload["message"], "URL is required");
    }
}

#[tokio::test]
async fn malformed_url_is_rejected() {
    let (_, app) = test_app();

    let (status, body) = send(
        &app,
        post_json("/api/shorten", json!({"url": "not-a-valid-url"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid URL format");
}

#[tokio::test]
async fn custom_alias_round_trip_and_conflict() {
    let (_, app) = test_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/shorten",
            json!({"url": "https://example.com", "alias": "my-link"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], "my-link");
    assert_eq!(body["shortUrl"], "https://snip.example/my-link");

    let (status, body) = send(
        &app,
        post_json(
            "/api/shorten",
            json!({"url": "https://other.example", "alias": "my-link"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "This alias is already taken");

    // The losing request must not have touched the stored link.
    let response = send_raw(&app, get("/my-link")).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(response.headers()[header::LOCATION], "https://example.com");
}

#[tokio::test]
async fn alias_charset_is_enforced() {
    let (_, app) = test_app();

    let (status, body) = send(
        &app,
        post_json(
            "/api/shorten",
            json!({"url": "https://example.com", "alias": "bad alias!"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"],
        "Alias can only contain letters, numbers, hyphens and underscores"
    );
}

#[tokio::test]
async fn reserved_paths_never_resolve_even_when_records_exist() {
    let (repository, app) = test_app();
    repository
        .put(&UrlRecord::new(
            code("favicon"),
            "https://example.com/icon",
            None,
        ))
        .await
        .unwrap();

    for path in ["/favicon", "/favicon.ico", "/_nuxt", "/_private", "/api", "/a/b"] {
        let response = send_raw(&app, get(path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
        assert!(response.headers().get(header::LOCATION).is_none(), "{path}");
    }

    // The planted record must not have been touched by any of those.
    let stored = repository.get(&code("favicon")).await.unwrap().unwrap();
    assert_eq!(stored.clicks, 0);
}

#[tokio::test]
async fn listing_is_newest_first_and_capped_at_ten() {
    let (repository, app) = test_app();
    let base = jiff::Timestamp::now();
    for i in 0..12 {
        let mut record = UrlRecord::new(
            code(&format!("code-{i:02}")),
            format!("https://example.com/{i}"),
            None,
        );
        record.created_at = base - ((12 - i) as i64).seconds();
        repository.put(&record).await.unwrap();
    }

    let (status, body) = send(&app, get("/api/urls")).await;
    assert_eq!(status, StatusCode::OK);
    let listed = body.as_array().unwrap();
    assert_eq!(listed.len(), 10);
    assert_eq!(listed[0]["code"], "code-11");
    assert_eq!(listed[9]["code"], "code-02");

    // Wire format is camelCase, and absent aliases are omitted entirely.
    assert_eq!(listed[0]["originalUrl"], "https://example.com/11");
    assert!(listed[0]["createdAt"].is_string());
    assert!(listed[0].get("alias").is_none());
}

#[tokio::test]
async fn admin_listing_requires_the_shared_secret() {
    let (_, app) = test_app();

    let (status, _) = send(&app, get("/api/admin/urls")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/api/admin/urls")
        .header("x-admin-auth", "wrong")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid password");

    let request = Request::builder()
        .uri("/api/admin/urls")
        .header("x-admin-auth", TEST_PASSWORD)
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_array());
}

#[tokio::test]
async fn verify_accepts_only_the_admin_password() {
    let (_, app) = test_app();

    let (status, body) = send(
        &app,
        post_json("/api/admin/verify", json!({"password": TEST_PASSWORD})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    for payload in [json!({"password": "nope"}), json!({})] {
        let (status, body) = send(&app, post_json("/api/admin/verify", payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid password");
    }
}

#[tokio::test]
async fn health_reports_ok() {
    let (_, app) = test_app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn configured_public_base_overrides_header_derivation() {
    let repository = UrlRepository::new(Arc::new(MemoryStore::new()));
    let state = AppState::new(
        repository,
        TEST_PASSWORD,
        Some("https://sn.ip/".to_owned()),
    );
    let app = App::router(state);

    let (status, body) = send(
        &app,
        post_json("/api/shorten", json!({"url": "https://example.com"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let short_code = body["code"].as_str().unwrap();
    assert_eq!(body["shortUrl"], format!("https://sn.ip/{short_code}"));
}

#[tokio::test]
async fn forwarded_proto_header_shapes_the_short_url() {
    let (_, app) = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/api/shorten")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::HOST, "snip.example")
        .header("x-forwarded-proto", "http")
        .body(Body::from(json!({"url": "https://example.com"}).to_string()))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["shortUrl"]
        .as_str()
        .unwrap()
        .starts_with("http://snip.example/"));
}

#[tokio::test]
async fn redis_backend_matches_memory_behavior() {
    let Ok(url) = std::env::var("SNIPURL_TEST_REDIS_URL") else {
        return;
    };
    let store = RedisStore::connect(RedisConfig::builder().url(url).build())
        .await
        .expect("connect to test redis");
    let repository = UrlRepository::new(Arc::new(store));
    let app = App::router(AppState::new(repository.clone(), TEST_PASSWORD, None));

    let (status, body) = send(
        &app,
        post_json("/api/shorten", json!({"url": "https://example.com/redis"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let short_code = body["code"].as_str().unwrap().to_owned();

    let response = send_raw(&app, get(&format!("/{short_code}"))).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/redis"
    );

    let stored = repository.get(&code(&short_code)).await.unwrap().unwrap();
    assert_eq!(stored.clicks, 1);
}
