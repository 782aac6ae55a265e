use std::time::Duration;

use httpmock::prelude::*;
use serde_json::json;

use super::*;
use crate::config::LlmConfig;

fn test_client(server: &MockServer, path: &str) -> LlmClient {
    LlmClient::new(server.url(path), "default").backoff(Duration::from_millis(1))
}

fn answer_body(content: &str) -> serde_json::Value {
    json!({"choices": [{"message": {"role": "assistant", "content": content}}]})
}

#[tokio::test]
async fn test_complete_returns_answer_text() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .json_body_partial(
                    r#"{"model": "default", "max_tokens": 64, "temperature": 0.0}"#,
                );
            then.status(200).json_body(answer_body("Yes, different topics."));
        })
        .await;

    let answer = test_client(&server, "/v1/chat/completions")
        .complete("different topics?")
        .await;

    assert_eq!(answer, "Yes, different topics.");
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_unauthorized_short_circuits_to_no() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(401).body("bad key");
        })
        .await;

    let answer = test_client(&server, "/chat").complete("?").await;

    assert_eq!(answer, FALLBACK_ANSWER);
    // a bad credential is not retried
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_server_error_retries_then_falls_back() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(500).body("boom");
        })
        .await;

    let answer = test_client(&server, "/chat").complete("?").await;

    assert_eq!(answer, FALLBACK_ANSWER);
    assert_eq!(mock.hits_async().await, 3);
}

#[tokio::test]
async fn test_rate_limit_retries_then_falls_back() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(429).body("slow down");
        })
        .await;

    let answer = test_client(&server, "/chat").complete("?").await;

    assert_eq!(answer, FALLBACK_ANSWER);
    assert_eq!(mock.hits_async().await, 3);
}

#[tokio::test]
async fn test_malformed_response_falls_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(200).body("not json at all");
        })
        .await;

    let answer = test_client(&server, "/chat").complete("?").await;
    assert_eq!(answer, FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_empty_choices_fall_back() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat");
            then.status(200).json_body(json!({"choices": []}));
        })
        .await;

    let answer = test_client(&server, "/chat").complete("?").await;
    assert_eq!(answer, FALLBACK_ANSWER);
}

#[tokio::test]
async fn test_router_local_mode_hits_configured_server() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(answer_body("yes"));
        })
        .await;

    let cfg = LlmConfig::Local {
        server_url: server.base_url(),
    };
    let answer = ProviderRouter::new(&cfg).call("?").await;

    assert_eq!(answer, "yes");
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_router_auto_mode_behaves_as_local() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/");
            then.status(200).json_body(answer_body("no"));
        })
        .await;

    let cfg = LlmConfig::Auto {
        server_url: server.base_url(),
    };
    let answer = ProviderRouter::new(&cfg).call("?").await;

    assert_eq!(answer, "no");
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn test_router_remote_mode_sends_model_and_auth() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/v1/chat/completions")
                .header("authorization", "Bearer sk-test")
                .json_body_partial(r#"{"model": "gpt-4o-mini"}"#);
            then.status(200).json_body(answer_body("yes"));
        })
        .await;

    let cfg = LlmConfig::Remote {
        endpoint: server.url("/v1/chat/completions"),
        model: "gpt-4o-mini".to_string(),
        api_key: Some("sk-test".to_string()),
    };
    let answer = ProviderRouter::new(&cfg).call("?").await;

    assert_eq!(answer, "yes");
    assert_eq!(mock.hits_async().await, 1);
}
