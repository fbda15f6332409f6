// Generation client tests against a mock chat completions API
// Author: kelexine (https://github.com/kelexine)

use studyforge::config::GenerationConfig;
use studyforge::error::AppError;
use studyforge::generation::{GenerationRequest, HttpGenerator, TextGenerator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

fn generator_for(server: &mockito::Server) -> HttpGenerator {
    generator_at(server.url())
}

fn generator_at(api_base_url: String) -> HttpGenerator {
    let config = GenerationConfig {
        api_base_url,
        api_key: Some("sk-test".to_string()),
        max_retries: 0,
        ..GenerationConfig::default()
    };
    HttpGenerator::new(&config, true).unwrap()
}

#[tokio::test]
async fn test_generate_returns_first_choice() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"  Because 2 + 2 = 4.  "}}]}"#)
        .create_async()
        .await;

    let text = generator_for(&server)
        .generate(GenerationRequest::new("explanation", "Why is 2 + 2 = 4?"))
        .await
        .unwrap();

    assert_eq!(text, "Because 2 + 2 = 4.");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(400)
        .with_body(r#"{"error":{"message":"bad model","type":"invalid_request_error"}}"#)
        .expect(1)
        .create_async()
        .await;

    let result = generator_for(&server)
        .generate(GenerationRequest::new("summary", "text"))
        .await;

    match result {
        Err(AppError::Generation(message)) => assert!(message.contains("bad model")),
        other => panic!("expected generation error, got {:?}", other),
    }
    mock.assert_async().await;
}

#[tokio::test]
async fn test_rate_limit_maps_to_too_many_requests() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("retry-after", "1")
        .with_body(r#"{"error":{"message":"slow down"}}"#)
        .create_async()
        .await;

    let result = generator_for(&server)
        .generate(GenerationRequest::new("quiz", "text"))
        .await;

    assert!(matches!(result, Err(AppError::TooManyRequests(_))));
}

#[tokio::test]
async fn test_truncated_body_reports_read_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Drain the request (headers plus JSON body) before answering
        let mut request = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            let n = socket.read(&mut buf).await.unwrap();
            request.extend_from_slice(&buf[..n]);
            if n == 0 || request.ends_with(b"}") {
                break;
            }
        }
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\n\r\n{\"choi",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let result = generator_at(format!("http://{}", addr))
        .generate(GenerationRequest::new("summary", "text"))
        .await;

    match result {
        Err(AppError::Generation(message)) => {
            assert!(message.contains("Failed to read response body"), "{}", message)
        }
        other => panic!("expected generation error, got {:?}", other),
    }
}
