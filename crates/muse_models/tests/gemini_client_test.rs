//! Tests for the Gemini client against a mock HTTP server.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use muse_error::GenerationErrorKind;
use muse_models::{GeminiClient, GeminiConfig};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEXT_PATH: &str = "/v1beta/models/text-model:generateContent";
const IMAGE_PATH: &str = "/v1beta/models/image-model:generateContent";

fn client_for(server: &MockServer) -> GeminiClient {
    let config = GeminiConfig::builder()
        .api_key("test-key")
        .base_url(format!("{}/v1beta", server.uri()))
        .text_model("text-model")
        .image_model("image-model")
        .timeout_secs(5u64)
        .build()
        .expect("valid config");
    GeminiClient::new(config).expect("client builds")
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("POST"))
        .and(path(route))
        .and(query_param("key", "test-key"))
        .respond_with(response)
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_text_success_returns_first_text_part() {
    let server = MockServer::start().await;
    mount(
        &server,
        TEXT_PATH,
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"parts": [{"text": "**Definição:** charme"}], "role": "model"},
                "finishReason": "STOP"
            }]
        })),
    )
    .await;

    let text = client_for(&server).generate_text("explain rizz").await.unwrap();
    assert_eq!(text, "**Definição:** charme");
}

#[tokio::test]
async fn test_text_request_carries_prompt_safety_and_sampling() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "explain rizz"}]}],
            "safetySettings": [{"category": "HARM_CATEGORY_HARASSMENT", "threshold": "BLOCK_NONE"}],
            "generationConfig": {"temperature": 0.7, "topK": 1, "maxOutputTokens": 512}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    assert_eq!(client_for(&server).generate_text("explain rizz").await.unwrap(), "ok");
}

#[tokio::test]
async fn test_http_429_is_rate_limited() {
    let server = MockServer::start().await;
    mount(
        &server,
        TEXT_PATH,
        ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": 429, "status": "RESOURCE_EXHAUSTED"}
        })),
    )
    .await;

    let err = client_for(&server).generate_text("p").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::RateLimited);
}

#[tokio::test]
async fn test_http_500_is_transport_error_with_status() {
    let server = MockServer::start().await;
    mount(&server, TEXT_PATH, ResponseTemplate::new(500)).await;

    let err = client_for(&server).generate_text("p").await.unwrap_err();
    assert_eq!(
        err.kind,
        GenerationErrorKind::TransportError { status: Some(500) }
    );
}

#[tokio::test]
async fn test_unreachable_server_is_transport_error_without_status() {
    let config = GeminiConfig::builder()
        .api_key("test-key")
        .base_url("http://127.0.0.1:1/v1beta")
        .timeout_secs(5u64)
        .build()
        .expect("valid config");
    let client = GeminiClient::new(config).expect("client builds");

    let err = client.generate_text("p").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::TransportError { status: None });
}

#[tokio::test]
async fn test_safety_finish_reason_is_safety_blocked() {
    let server = MockServer::start().await;
    mount(
        &server,
        TEXT_PATH,
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"finishReason": "SAFETY", "index": 0}]
        })),
    )
    .await;

    let err = client_for(&server).generate_text("p").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::SafetyBlocked);
}

#[tokio::test]
async fn test_prompt_feedback_is_prompt_blocked() {
    let server = MockServer::start().await;
    mount(
        &server,
        TEXT_PATH,
        ResponseTemplate::new(200).set_body_json(json!({
            "promptFeedback": {"blockReason": "OTHER"}
        })),
    )
    .await;

    let err = client_for(&server).generate_text("p").await.unwrap_err();
    assert_eq!(
        err.kind,
        GenerationErrorKind::PromptBlocked {
            reason: "OTHER".to_string()
        }
    );
}

#[tokio::test]
async fn test_empty_candidates_is_no_candidates() {
    let server = MockServer::start().await;
    mount(
        &server,
        TEXT_PATH,
        ResponseTemplate::new(200).set_body_json(json!({"candidates": []})),
    )
    .await;

    let err = client_for(&server).generate_text("p").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::NoCandidates);
}

#[tokio::test]
async fn test_non_json_body_is_malformed() {
    let server = MockServer::start().await;
    mount(
        &server,
        TEXT_PATH,
        ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"),
    )
    .await;

    let err = client_for(&server).generate_text("p").await.unwrap_err();
    assert!(matches!(err.kind, GenerationErrorKind::MalformedResponse(_)));
}

#[tokio::test]
async fn test_image_request_asks_for_image_modality() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(IMAGE_PATH))
        .and(body_partial_json(json!({
            "generationConfig": {"responseModalities": ["TEXT", "IMAGE"]}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [
                {"text": "Aqui está"},
                {"inlineData": {"mimeType": "image/png", "data": STANDARD.encode(b"PNGDATA")}}
            ]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let image = client_for(&server).generate_image("logo").await.unwrap();
    assert_eq!(image.bytes, b"PNGDATA");
    assert_eq!(image.mime_type, "image/png");
}

#[tokio::test]
async fn test_image_response_without_inline_data_is_no_image_data() {
    let server = MockServer::start().await;
    mount(
        &server,
        IMAGE_PATH,
        ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "I can only describe it"}]}}]
        })),
    )
    .await;

    let err = client_for(&server).generate_image("logo").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::NoImageData);
}

#[tokio::test]
async fn test_image_429_is_rate_limited() {
    let server = MockServer::start().await;
    mount(&server, IMAGE_PATH, ResponseTemplate::new(429)).await;

    let err = client_for(&server).generate_image("logo").await.unwrap_err();
    assert_eq!(err.kind, GenerationErrorKind::RateLimited);
}
