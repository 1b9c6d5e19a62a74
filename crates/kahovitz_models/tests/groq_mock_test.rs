//! GroqDriver against a mock chat-completion server.

use kahovitz_core::{GenerateRequest, Message, ModelConfig};
use kahovitz_error::{GenerationErrorKind, KahovitzErrorKind};
use kahovitz_interface::KahovitzDriver;
use kahovitz_models::GroqDriver;
use mockito::Matcher;
use serde_json::json;

fn completion(content: &str) -> String {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "created": 1_700_000_000,
        "model": "llama-3.3-70b-versatile",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
    })
    .to_string()
}

fn generation_kind(err: &kahovitz_error::KahovitzError) -> GenerationErrorKind {
    match err.kind() {
        KahovitzErrorKind::Generation(e) => e.kind.clone(),
        other => panic!("expected generation error, got {other}"),
    }
}

#[tokio::test]
async fn sends_openai_wire_format() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/openai/v1/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "llama-3.3-70b-versatile",
            "messages": [
                {"role": "system", "content": "You are Char1."},
                {"role": "user", "content": "What does Char1 say next?"}
            ],
            "max_tokens": 500,
            "temperature": 0.8,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(completion("Hello there."))
        .expect(1)
        .create_async()
        .await;

    let driver = GroqDriver::with_api_key("test-key", "llama-3.3-70b-versatile")
        .with_endpoint(format!("{}/openai/v1/chat/completions", server.url()));

    let request = GenerateRequest::with_config(
        vec![
            Message::system("You are Char1."),
            Message::user("What does Char1 say next?"),
        ],
        &ModelConfig::new(0.8, 500),
    );

    let response = driver.generate(&request).await.unwrap();
    assert_eq!(response.text().as_deref(), Some("Hello there."));
    assert_eq!(driver.provider_name(), "groq");
    mock.assert_async().await;
}

#[tokio::test]
async fn request_model_overrides_driver_default() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/")
        .match_body(Matcher::PartialJson(json!({"model": "llama-3.1-8b-instant"})))
        .with_status(200)
        .with_body(completion("ok"))
        .create_async()
        .await;

    let driver = GroqDriver::with_api_key("k", "llama-3.3-70b-versatile").with_endpoint(server.url());
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hi")])
        .model(Some("llama-3.1-8b-instant".to_string()))
        .build()
        .unwrap();

    driver.generate(&request).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn maps_status_codes_to_error_kinds() {
    let mut server = mockito::Server::new_async().await;
    let driver = GroqDriver::with_api_key("k", "m").with_endpoint(server.url());
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hi")])
        .build()
        .unwrap();

    let _m = server
        .mock("POST", "/")
        .with_status(429)
        .with_body("slow down")
        .create_async()
        .await;
    let err = driver.generate(&request).await.unwrap_err();
    assert_eq!(
        generation_kind(&err),
        GenerationErrorKind::RateLimit("slow down".to_string())
    );

    server.reset_async().await;
    let _m = server
        .mock("POST", "/")
        .with_status(401)
        .with_body(r#"{"error":{"message":"Invalid API Key"}}"#)
        .create_async()
        .await;
    let err = driver.generate(&request).await.unwrap_err();
    match generation_kind(&err) {
        GenerationErrorKind::Api { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("Invalid API Key"));
        }
        other => panic!("unexpected kind: {other}"),
    }
    assert!(err.details().unwrap().contains("Invalid API Key"));
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let driver = GroqDriver::with_api_key("k", "m").with_endpoint(server.url());
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hi")])
        .build()
        .unwrap();

    let err = driver.generate(&request).await.unwrap_err();
    assert_eq!(generation_kind(&err), GenerationErrorKind::EmptyResponse);
}

#[tokio::test]
async fn garbage_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("<html>gateway</html>")
        .create_async()
        .await;

    let driver = GroqDriver::with_api_key("k", "m").with_endpoint(server.url());
    let request = GenerateRequest::builder()
        .messages(vec![Message::user("hi")])
        .build()
        .unwrap();

    let err = driver.generate(&request).await.unwrap_err();
    assert!(matches!(
        generation_kind(&err),
        GenerationErrorKind::ResponseParsing(_)
    ));
}

#[test]
fn missing_env_credential_is_reported_by_name() {
    let err = GroqDriver::from_env("KAHOVITZ_TEST_UNSET_GROQ_KEY", "m").unwrap_err();
    assert_eq!(
        generation_kind(&err),
        GenerationErrorKind::MissingCredential("KAHOVITZ_TEST_UNSET_GROQ_KEY".to_string())
    );
}
