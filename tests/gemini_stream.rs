//! Integration tests for the Gemini provider against a mock HTTP server.

use chefmate::config::GeminiConfig;
use chefmate::error::ChefmateError;
use chefmate::providers::{ChatTurn, Provider};
use chefmate::providers::GeminiProvider;
use futures::StreamExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> GeminiProvider {
    let config = GeminiConfig {
        model: "gemini-2.5-flash".to_string(),
        api_key: Some("test-key".to_string()),
        api_base: Some(server.uri()),
        timeout_seconds: 5,
    };
    GeminiProvider::new(&config).unwrap()
}

fn sse_chunk(text: &str) -> String {
    format!(
        "data: {}\n\n",
        serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": text}], "role": "model"}
            }]
        })
    )
}

#[tokio::test]
async fn stream_complete_yields_chunks_in_order() {
    let server = MockServer::start().await;
    let body = format!(
        "{}{}{}",
        sse_chunk("Use "),
        sse_chunk("soy sauce "),
        sse_chunk("instead.")
    );
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
        .and(query_param("alt", "sse"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let turns = [ChatTurn::user("How do I substitute fish sauce?")];
    let mut stream = provider
        .stream_complete("You are an expert Thai chef.", &turns)
        .await
        .unwrap();

    let mut chunks = Vec::new();
    while let Some(item) = stream.next().await {
        chunks.push(item.unwrap());
    }
    assert_eq!(chunks, vec!["Use ", "soy sauce ", "instead."]);
    assert_eq!(chunks.concat(), "Use soy sauce instead.");
}

#[tokio::test]
async fn stream_complete_skips_payloads_without_text() {
    let server = MockServer::start().await;
    let body = format!(
        "{}data: {}\n\n{}",
        sse_chunk("hello"),
        serde_json::json!({"usageMetadata": {"promptTokenCount": 12}}),
        sse_chunk(" world")
    );
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body, "text/event-stream"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let mut stream = provider
        .stream_complete("instruction", &[ChatTurn::user("hi")])
        .await
        .unwrap();

    let mut chunks = Vec::new();
    while let Some(item) = stream.next().await {
        chunks.push(item.unwrap());
    }
    assert_eq!(chunks, vec!["hello", " world"]);
}

#[tokio::test]
async fn stream_complete_maps_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(ResponseTemplate::new(401).set_body_string("API key not valid"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .stream_complete("instruction", &[ChatTurn::user("hi")])
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err.downcast_ref::<ChefmateError>(),
        Some(ChefmateError::Authentication(_))
    ));
}

#[tokio::test]
async fn stream_complete_maps_rate_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:streamGenerateContent"))
        .respond_with(ResponseTemplate::new(429).set_body_string("quota exhausted"))
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .stream_complete("instruction", &[ChatTurn::user("hi")])
        .await
        .err()
        .unwrap();

    match err.downcast_ref::<ChefmateError>() {
        Some(ChefmateError::QuotaExceeded(msg)) => assert!(msg.contains("quota exhausted")),
        other => panic!("Expected QuotaExceeded, got {:?}", other),
    }
}

#[tokio::test]
async fn complete_returns_full_text() {
    let server = MockServer::start().await;
    let body = serde_json::json!({
        "candidates": [{
            "content": {
                "parts": [{"text": "Tom Yum Goong\n\nIngredients:\n- shrimp\n- lemongrass"}],
                "role": "model"
            },
            "finishReason": "STOP"
        }]
    });
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let text = provider
        .complete("Extract the recipe.", "raw transcript text")
        .await
        .unwrap();
    assert!(text.starts_with("Tom Yum Goong"));
    assert!(text.contains("lemongrass"));
}

#[tokio::test]
async fn complete_rejects_malformed_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-2.5-flash:generateContent"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"unexpected": true})),
        )
        .mount(&server)
        .await;

    let provider = provider_for(&server);
    let err = provider
        .complete("Extract the recipe.", "raw transcript text")
        .await
        .err()
        .unwrap();

    assert!(matches!(
        err.downcast_ref::<ChefmateError>(),
        Some(ChefmateError::MalformedResponse(_))
    ));
}
