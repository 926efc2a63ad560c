//! Integration tests for HTTP transport

use stdio_bridge_transport::{HttpRequest, HttpTransport, Transport, TransportError};
use wiremock::matchers::{any, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_http_request_builder() {
    let request = HttpRequest::new("GET", "https://example.com")
        .with_header("Authorization", "Bearer token123")
        .with_header("Content-Type", "application/json");

    assert_eq!(request.method, "GET");
    assert_eq!(request.url, "https://example.com");
    assert_eq!(request.headers.len(), 2);
    assert_eq!(
        request.headers.get("Authorization"),
        Some(&"Bearer token123".to_string())
    );
    assert_eq!(request.body, None);
}

#[tokio::test]
async fn test_http_request_with_body() {
    let body = vec![1, 2, 3, 4, 5];
    let request = HttpRequest::new("POST", "https://api.example.com").with_body(body.clone());

    assert_eq!(request.body, Some(body));
}

#[tokio::test]
async fn test_send_forwards_method_headers_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/chat/completions"))
        .and(header("Authorization", "Bearer test-key"))
        .and(body_string(r#"{"model":"llama"}"#))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":"cmpl-1"}"#))
        .expect(1)
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new(
        "post",
        format!("{}/api/v1/chat/completions", mock_server.uri()),
    )
    .with_header("Authorization", "Bearer test-key")
    .with_body(br#"{"model":"llama"}"#.to_vec());

    let response = transport.send_http(request).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.text_lossy(), r#"{"id":"cmpl-1"}"#);
}

#[tokio::test]
async fn test_error_status_is_a_response_not_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/models"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("content-type", "application/json")
                .set_body_string(r#"{"error":"unauthorized"}"#),
        )
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new("GET", format!("{}/api/v1/models", mock_server.uri()));

    let response = transport.send_http(request).await.unwrap();
    assert_eq!(response.status, 401);
    assert_eq!(response.text_lossy(), r#"{"error":"unauthorized"}"#);
}

#[tokio::test]
async fn test_request_without_body_sends_empty_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/x"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    let request = HttpRequest::new("DELETE", format!("{}/x", mock_server.uri()));
    let response = transport.send_http(request).await.unwrap();
    assert_eq!(response.status, 204);

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].body.is_empty());
}

#[tokio::test]
async fn test_connection_refused_is_an_error() {
    // Bind then drop a listener so the port is known to be closed
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let transport = HttpTransport::new().unwrap();
    let err = transport
        .send_http(HttpRequest::new("POST", format!("{uri}/x")))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        TransportError::Connection(_) | TransportError::Http(_)
    ));
}

#[tokio::test]
async fn test_custom_method_sent_with_original_case() {
    let mock_server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .mount(&mock_server)
        .await;

    let transport = HttpTransport::new().unwrap();
    for verb in ["Foo", "patch", "get"] {
        transport
            .send_http(HttpRequest::new(verb, format!("{}/x", mock_server.uri())))
            .await
            .unwrap();
    }

    let received = mock_server.received_requests().await.unwrap();
    let methods: Vec<&str> = received.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(methods, vec!["Foo", "patch", "GET"]);
}
