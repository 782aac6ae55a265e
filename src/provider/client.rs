use std::time::Duration;

use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::warn;

use super::types::{ChatMessage, ChatRequest, ChatResponse};

/// Total attempts per review query before giving up.
const MAX_ATTEMPTS: u32 = 3;

/// The answer is a short yes/no; cap generation accordingly.
const MAX_ANSWER_TOKENS: u32 = 64;

/// What an exhausted or unauthenticated call degrades to. Vote counting
/// treats anything without "yes" as a no-vote, so failures never need
/// special-casing downstream.
pub const FALLBACK_ANSWER: &str = "no";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_BACKOFF: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    #[error("Authentication rejected")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("Server returned error status {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Response carried no answer text")]
    EmptyAnswer,
}

impl LlmError {
    /// Retrying cannot fix a bad credential.
    fn is_fatal(&self) -> bool {
        matches!(self, LlmError::Unauthorized)
    }
}

/// Chat client for one review backend. Every public call resolves to a
/// response string; transport trouble is absorbed into [`FALLBACK_ANSWER`]
/// once retries run out.
pub struct LlmClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    backoff: Duration,
}

impl LlmClient {
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, model, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: None,
            backoff: DEFAULT_BACKOFF,
        }
    }

    /// Bearer token for backends that authenticate.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Base delay between retry attempts; attempt n waits n times this.
    pub fn backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    /// Ask the backend one yes/no question and return its answer text.
    /// Never fails: after `MAX_ATTEMPTS` transient errors, or immediately on
    /// an auth rejection, the answer is [`FALLBACK_ANSWER`].
    pub async fn complete(&self, prompt: &str) -> String {
        for attempt in 1..=MAX_ATTEMPTS {
            match self.try_complete(prompt).await {
                Ok(answer) => return answer,
                Err(err) if err.is_fatal() => {
                    warn!(error = %err, "review call rejected, not retrying");
                    return FALLBACK_ANSWER.to_string();
                }
                Err(err) => {
                    warn!(error = %err, attempt, "review call failed");
                    if attempt < MAX_ATTEMPTS {
                        tokio::time::sleep(self.backoff * attempt).await;
                    }
                }
            }
        }
        FALLBACK_ANSWER.to_string()
    }

    async fn try_complete(&self, prompt: &str) -> Result<String, LlmError> {
        let req = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: MAX_ANSWER_TOKENS,
            temperature: 0.0,
        };

        let mut request = self.http.post(&self.endpoint).json(&req);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        match status {
            StatusCode::UNAUTHORIZED => return Err(LlmError::Unauthorized),
            StatusCode::TOO_MANY_REQUESTS => return Err(LlmError::RateLimited),
            s if !s.is_success() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                return Err(LlmError::ServerError {
                    status: s.as_u16(),
                    body,
                });
            }
            _ => {}
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.is_empty())
            .ok_or(LlmError::EmptyAnswer)
    }
}
