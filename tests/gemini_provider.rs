//! Gemini provider against a mock generateContent endpoint.
//!
//! The mock picks its behaviour from the model name in the request path.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::sync::Mutex;

use alumni_portal::chat::{AiAvailability, ChatResponder};
use alumni_portal::config::GeminiConfig;
use alumni_portal::error::LlmError;
use alumni_portal::llm::{GeminiProvider, LlmProvider};

const API_KEY: &str = "test-gemini-key";

#[derive(Debug, Clone)]
struct Captured {
    action: String,
    api_key: Option<String>,
    body: Value,
}

#[derive(Clone, Default)]
struct MockState {
    requests: Arc<Mutex<Vec<Captured>>>,
}

async fn mock_generate(
    State(state): State<MockState>,
    Path(action): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.requests.lock().await.push(Captured {
        action: action.clone(),
        api_key: headers
            .get("x-goog-api-key")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    let model = action.split(':').next().unwrap_or_default();
    match model {
        "ok-model" => (
            StatusCode::OK,
            json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [{"text": "Hi from "}, {"text": "Gemini"}]
                    },
                    "finishReason": "STOP"
                }]
            })
            .to_string(),
        )
            .into_response(),
        "empty-model" => (StatusCode::OK, json!({ "candidates": [] }).to_string()).into_response(),
        "garbage-model" => (StatusCode::OK, "not json at all").into_response(),
        "auth-model" => (StatusCode::FORBIDDEN, "API key not valid").into_response(),
        "busy-model" => (
            StatusCode::TOO_MANY_REQUESTS,
            [("retry-after", "7")],
            "quota exceeded",
        )
            .into_response(),
        _ => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
    }
}

async fn start_mock_server() -> (String, MockState) {
    let state = MockState::default();
    let router = Router::new()
        .route("/v1beta/models/{*action}", post(mock_generate))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), state)
}

fn provider(base_url: &str, model: &str) -> GeminiProvider {
    let mut config = GeminiConfig::new(API_KEY).with_base_url(base_url);
    config.model = model.to_string();
    config.timeout = Duration::from_secs(5);
    GeminiProvider::new(config).unwrap()
}

#[tokio::test]
async fn sends_prompt_and_joins_candidate_parts() {
    let (base, state) = start_mock_server().await;
    let gemini = provider(&base, "ok-model");

    let resp = gemini.generate("How many alumni?").await.unwrap();
    assert_eq!(resp.text.as_deref(), Some("Hi from Gemini"));
    assert_eq!(gemini.model_name(), "ok-model");

    let requests = state.requests.lock().await;
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].action, "ok-model:generateContent");
    assert_eq!(requests[0].api_key.as_deref(), Some(API_KEY));
    assert_eq!(
        requests[0].body,
        json!({ "contents": [{ "role": "user", "parts": [{ "text": "How many alumni?" }] }] })
    );
}

#[tokio::test]
async fn trailing_slash_in_base_url_is_tolerated() {
    let (base, state) = start_mock_server().await;
    let gemini = provider(&format!("{base}/"), "ok-model");

    assert!(gemini.generate("x").await.is_ok());
    assert_eq!(state.requests.lock().await[0].action, "ok-model:generateContent");
}

#[tokio::test]
async fn no_candidates_means_no_text() {
    let (base, _) = start_mock_server().await;
    let resp = provider(&base, "empty-model").generate("x").await.unwrap();
    assert_eq!(resp.text, None);
    assert_eq!(resp.usable_text(), None);
}

#[tokio::test]
async fn http_errors_are_classified() {
    let (base, _) = start_mock_server().await;

    let err = provider(&base, "auth-model").generate("x").await.unwrap_err();
    assert!(matches!(err, LlmError::AuthFailed { .. }), "{err:?}");

    let err = provider(&base, "busy-model").generate("x").await.unwrap_err();
    match err {
        LlmError::RateLimited { retry_after, .. } => {
            assert_eq!(retry_after, Some(Duration::from_secs(7)));
        }
        other => panic!("expected rate limit, got {other:?}"),
    }

    let err = provider(&base, "broken-model").generate("x").await.unwrap_err();
    match err {
        LlmError::RequestFailed { reason, .. } => {
            assert!(reason.contains("500"), "{reason}");
            assert!(reason.contains("upstream exploded"), "{reason}");
        }
        other => panic!("expected request failure, got {other:?}"),
    }

    let err = provider(&base, "garbage-model").generate("x").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidResponse { .. }), "{err:?}");
}

#[tokio::test]
async fn unreachable_endpoint_is_a_request_failure() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = provider(&format!("http://{addr}/v1beta"), "ok-model")
        .generate("x")
        .await
        .unwrap_err();
    assert!(matches!(err, LlmError::RequestFailed { .. }), "{err:?}");
}

#[tokio::test]
async fn responder_probes_once_at_startup() {
    let (base, state) = start_mock_server().await;

    let ok: Arc<dyn LlmProvider> = Arc::new(provider(&base, "ok-model"));
    let responder = ChatResponder::initialize(Some(ok)).await;
    assert_eq!(responder.availability(), AiAvailability::Available);
    assert_eq!(responder.respond("hello").await, "Hi from Gemini");

    let failing: Arc<dyn LlmProvider> = Arc::new(provider(&base, "auth-model"));
    let responder = ChatResponder::initialize(Some(failing)).await;
    assert_eq!(responder.availability(), AiAvailability::Fallback);
    responder.respond("hello").await;

    let requests = state.requests.lock().await;
    let probes: Vec<&Captured> = requests
        .iter()
        .filter(|r| r.body["contents"][0]["parts"][0]["text"] == "Hello")
        .collect();
    assert_eq!(probes.len(), 2);
    assert_eq!(requests.len(), 3);
}
