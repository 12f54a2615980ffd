//! Integration tests for middleware functionality.

use spotkit::{HttpClient, HyperClient, Method, PreparedRequest};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{header, method, path},
};

fn prepared(server: &MockServer, endpoint: &str) -> PreparedRequest {
    let url = url::Url::parse(&format!("{}{endpoint}", server.uri())).expect("url");
    PreparedRequest::builder(Method::Get, url).build()
}

/// Test that logging middleware doesn't break request/response flow.
#[tokio::test]
async fn test_logging_middleware() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/logged"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged": true})))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_logging().build();
    let response = client
        .execute(prepared(&mock_server, "/v1/logged"))
        .await
        .expect("response");

    assert!(response.is_success());
}

/// Test debug logging with an authorization header on the request.
#[tokio::test]
async fn test_debug_logging() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/debug"))
        .and(header("Authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_debug_logging().build();
    let mut request = prepared(&mock_server, "/v1/debug");
    request
        .headers_mut()
        .insert("Authorization".to_string(), "Bearer secret".to_string());

    let response = client.execute(request).await.expect("response");

    // Redaction only affects the logs, not the request.
    assert!(response.is_success());
}

/// Test that error statuses pass through the transport untouched.
#[tokio::test]
async fn test_error_status_is_a_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_defaults().build();
    let response = client
        .execute(prepared(&mock_server, "/v1/missing"))
        .await
        .expect("response");

    assert_eq!(response.status(), 404);
    assert!(!response.is_success());
}

/// Test generic layer API with a request-mapping layer.
#[tokio::test]
async fn test_generic_layer_api() {
    use tower::util::MapRequestLayer;

    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/custom-layer"))
        .and(header("Accept-Language", "sv-SE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder()
        .with_defaults()
        .layer(MapRequestLayer::new(|mut request: PreparedRequest| {
            request
                .headers_mut()
                .insert("Accept-Language".to_string(), "sv-SE".to_string());
            request
        }))
        .build();

    let response = client
        .execute(prepared(&mock_server, "/v1/custom-layer"))
        .await
        .expect("response");

    assert!(response.is_success());
}

/// Test that concurrency limiting lets every request through.
#[cfg(feature = "middleware-concurrency")]
#[tokio::test]
async fn test_concurrency_limit() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/limited"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&mock_server)
        .await;

    let client = HyperClient::builder().with_concurrency_limit(1).build();

    let (a, b, c) = tokio::join!(
        client.execute(prepared(&mock_server, "/v1/limited")),
        client.execute(prepared(&mock_server, "/v1/limited")),
        client.execute(prepared(&mock_server, "/v1/limited")),
    );

    assert!(a.expect("first").is_success());
    assert!(b.expect("second").is_success());
    assert!(c.expect("third").is_success());
}
