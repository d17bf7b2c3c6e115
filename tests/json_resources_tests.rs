//! Integration tests for the fetch stack.
//!
//! These run the transport, the conditional-caching layer and the
//! access-token layer together against a mock provider.

use std::sync::Arc;

use provider_resources::clients::{HttpClient, HttpError, JsonResources};
use provider_resources::{AccessToken, BaseUrl, Provider, ProviderConfig, ResourceCache};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a config whose API root is the mock server.
fn create_test_config(server: &MockServer, provider: Provider) -> ProviderConfig {
    ProviderConfig::builder()
        .provider(provider)
        .base_url(BaseUrl::new(server.uri()).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Transport Tests
// ============================================================================

#[tokio::test]
async fn test_transport_returns_error_statuses_as_resources() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Github);
    let client = HttpClient::new(&config);

    let resource = client.get(config.uri("missing")).await.unwrap();

    assert_eq!(resource.status(), 404);
    assert_eq!(resource.body()["message"], json!("Not Found"));
}

#[tokio::test]
async fn test_transport_sends_provider_accept_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/user"))
        .and(header("Accept", "application/vnd.github.v3+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"login": "john"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Github);
    let resource = HttpClient::new(&config).get(config.uri("user")).await.unwrap();

    assert_eq!(resource.status(), 200);
}

#[tokio::test]
async fn test_transport_sends_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("PATCH"))
        .and(path("/repos/john/test"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"description": "updated"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"description": "updated"})))
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Github);
    let resource = HttpClient::new(&config)
        .patch(config.uri("repos/john/test"), json!({"description": "updated"}))
        .await
        .unwrap();

    assert_eq!(resource.body()["description"], json!("updated"));
}

#[tokio::test]
async fn test_network_failure_is_an_error() {
    let config = ProviderConfig::builder()
        .provider(Provider::Gitlab)
        .base_url(BaseUrl::new("http://127.0.0.1:1").unwrap())
        .build()
        .unwrap();

    let result = HttpClient::new(&config).get(config.uri("user")).await;

    assert!(matches!(result, Err(HttpError::Network(_))));
}

#[tokio::test]
async fn test_truncated_body_is_a_network_error_and_not_cached() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 4096];
        let _ = socket.read(&mut request).await;
        // Promises 100 bytes, sends 6, then hangs up
        let _ = socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nETag: \"v1\"\r\nContent-Type: application/json\r\nContent-Length: 100\r\n\r\n{\"id\":",
            )
            .await;
        let _ = socket.shutdown().await;
    });

    let config = ProviderConfig::builder()
        .provider(Provider::Github)
        .base_url(BaseUrl::new(format!("http://{addr}")).unwrap())
        .build()
        .unwrap();
    let cache = Arc::new(ResourceCache::new());
    let resources = HttpClient::new(&config).conditional(Arc::clone(&cache));

    let result = resources.get(config.uri("resource")).await;

    assert!(matches!(result, Err(HttpError::Network(_))));
    assert!(cache.is_empty());
}

// ============================================================================
// Conditional Caching Tests
// ============================================================================

#[tokio::test]
async fn test_etag_revalidation_end_to_end() {
    let server = MockServer::start().await;
    // Mounted first so it wins when the request revalidates
    Mock::given(method("GET"))
        .and(path("/resource"))
        .and(header("If-None-Match", "\"abc\""))
        .respond_with(ResponseTemplate::new(304).insert_header("ETag", "\"abc\""))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"abc\"")
                .set_body_json(json!({"id": 1})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Github);
    let cache = Arc::new(ResourceCache::new());
    let resources = HttpClient::new(&config).conditional(Arc::clone(&cache));
    let uri = config.uri("resource");

    let first = resources.get(uri.as_str()).await.unwrap();
    let cached = cache.get(&uri).unwrap();
    assert_eq!(cached.etag(), "\"abc\"");

    let second = resources.get(uri.as_str()).await.unwrap();

    assert_eq!(second.status(), 200);
    assert_eq!(second.body(), &json!({"id": 1}));
    assert_eq!(second.body(), first.body());
    assert_eq!(second.headers(), first.headers());
    assert_eq!(
        second.as_conditional().unwrap().created_at(),
        cached.created_at()
    );
}

#[tokio::test]
async fn test_changed_resource_refreshes_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/resource"))
        .and(header("If-None-Match", "\"e1\""))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"e2\"")
                .set_body_json(json!({"version": 2})),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/resource"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"e1\"")
                .set_body_json(json!({"version": 1})),
        )
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Gitlab);
    let cache = Arc::new(ResourceCache::new());
    let resources = HttpClient::new(&config).conditional(Arc::clone(&cache));
    let uri = config.uri("resource");

    resources.get(uri.as_str()).await.unwrap();
    let refreshed = resources.get(uri.as_str()).await.unwrap();

    assert_eq!(refreshed.body()["version"], json!(2));
    assert_eq!(cache.get(&uri).unwrap().etag(), "\"e2\"");
    assert_eq!(cache.len(), 1);
}

#[tokio::test]
async fn test_response_without_etag_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/volatile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"now": 1})))
        .expect(2)
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Github);
    let cache = Arc::new(ResourceCache::new());
    let resources = HttpClient::new(&config).conditional(Arc::clone(&cache));

    let first = resources.get(config.uri("volatile")).await.unwrap();
    resources.get(config.uri("volatile")).await.unwrap();

    assert!(!first.is_conditional());
    assert!(cache.is_empty());
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_token_views_are_isolated() {
    let server = MockServer::start().await;
    for token in ["t1", "t2"] {
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("Authorization", format!("Bearer {token}").as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": token})))
            .mount(&server)
            .await;
    }
    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"message": "401 Unauthorized"})))
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Gitlab);
    let first = HttpClient::new(&config)
        .authenticated(AccessToken::for_provider(Provider::Gitlab, "t1"));
    let second = first.with_token(AccessToken::for_provider(Provider::Gitlab, "t2"));
    let anonymous = first.with_token(AccessToken::for_provider(Provider::Gitlab, ""));

    let as_second = second.get(config.uri("user")).await.unwrap();
    let as_first = first.get(config.uri("user")).await.unwrap();
    let as_nobody = anonymous.get(config.uri("user")).await.unwrap();

    assert_eq!(as_second.body()["token"], json!("t2"));
    assert_eq!(as_first.body()["token"], json!("t1"));
    assert_eq!(as_nobody.status(), 401);
}

#[tokio::test]
async fn test_authenticated_views_share_one_cache() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/john/test"))
        .and(header("If-None-Match", "\"repo-v1\""))
        .and(header("Authorization", "token second"))
        .respond_with(ResponseTemplate::new(304))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/john/test"))
        .and(header("Authorization", "token first"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("ETag", "\"repo-v1\"")
                .set_body_json(json!({"full_name": "john/test"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = create_test_config(&server, Provider::Github);
    let cache = Arc::new(ResourceCache::new());
    let first = HttpClient::new(&config)
        .conditional(Arc::clone(&cache))
        .authenticated(AccessToken::for_provider(Provider::Github, "first"));
    let second = first.with_token(AccessToken::for_provider(Provider::Github, "second"));

    first.get(config.uri("repos/john/test")).await.unwrap();
    let revalidated = second.get(config.uri("repos/john/test")).await.unwrap();

    assert!(revalidated.is_conditional());
    assert_eq!(revalidated.body()["full_name"], json!("john/test"));
}
