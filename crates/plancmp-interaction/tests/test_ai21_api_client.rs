use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use plancmp_core::config::InferenceConfig;
use plancmp_core::inference::{InferenceClient, InferenceError};
use plancmp_core::prompt::Prompt;
use plancmp_interaction::Ai21ApiClient;
use serde_json::{Value, json};

const COMPLETIONS_PATH: &str = "/studio/v1/chat/completions";

/// Echoes the request body back inside a well-formed completion response,
/// after checking the bearer credential.
async fn echo_completion(headers: HeaderMap, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let authorized = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        == Some("Bearer test-key");
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "bad key"})));
    }

    let content = body["messages"][0]["content"].as_str().unwrap_or_default().to_string();
    (
        StatusCode::OK,
        Json(json!({
            "id": "chatcmpl-1",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": content},
                "finish_reason": "stop"
            }],
            "echo": body
        })),
    )
}

async fn internal_error() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded")
}

async fn not_json() -> &'static str {
    "<html>maintenance</html>"
}

async fn spawn_mock_server(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}{COMPLETIONS_PATH}")
}

fn client_for(endpoint: String, api_key: &str) -> Ai21ApiClient {
    let config = InferenceConfig {
        endpoint,
        ..InferenceConfig::default()
    };
    Ai21ApiClient::new(api_key, config).unwrap()
}

#[tokio::test]
async fn test_success_returns_raw_response() {
    let endpoint = spawn_mock_server(Router::new().route(COMPLETIONS_PATH, post(echo_completion))).await;
    let client = client_for(endpoint, "test-key");

    let response = client
        .complete(&Prompt::from_text("compare these"))
        .await
        .expect("Mock server answers 200");

    assert_eq!(response["choices"][0]["message"]["content"], "compare these");
    let echo = &response["echo"];
    assert_eq!(echo["model"], "jamba-1.5-large");
    assert_eq!(echo["max_tokens"], 2048);
    assert_eq!(echo["messages"].as_array().unwrap().len(), 1);
    assert_eq!(echo["messages"][0]["role"], "user");
}

#[tokio::test]
async fn test_server_error_is_status_error() {
    let endpoint = spawn_mock_server(Router::new().route(COMPLETIONS_PATH, post(internal_error))).await;
    let client = client_for(endpoint, "test-key");

    let err = client.complete(&Prompt::from_text("q")).await.unwrap_err();
    assert_eq!(
        err,
        InferenceError::Status {
            status: 500,
            body: "upstream exploded".to_string()
        }
    );
}

#[tokio::test]
async fn test_wrong_key_is_status_error() {
    let endpoint = spawn_mock_server(Router::new().route(COMPLETIONS_PATH, post(echo_completion))).await;
    let client = client_for(endpoint, "other-key");

    let err = client.complete(&Prompt::from_text("q")).await.unwrap_err();
    assert!(matches!(err, InferenceError::Status { status: 401, .. }));
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let endpoint = spawn_mock_server(Router::new().route(COMPLETIONS_PATH, post(not_json))).await;
    let client = client_for(endpoint, "test-key");

    let err = client.complete(&Prompt::from_text("q")).await.unwrap_err();
    assert!(matches!(err, InferenceError::Decode(_)));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_transport_error() {
    let client = client_for(format!("http://127.0.0.1:1{COMPLETIONS_PATH}"), "test-key");

    let err = client.complete(&Prompt::from_text("q")).await.unwrap_err();
    assert!(matches!(err, InferenceError::Transport(_)));
}
