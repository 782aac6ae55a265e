//! Review-query routing across LLM backends.

mod client;
mod types;

#[cfg(test)]
mod tests;

pub use client::{LlmClient, LlmError, FALLBACK_ANSWER};
pub use types::{ChatChoice, ChatChoiceMessage, ChatMessage, ChatRequest, ChatResponse};

use crate::config::LlmConfig;

/// The local server loads whatever model it was started with and ignores the
/// model field; send a fixed placeholder.
const LOCAL_MODEL: &str = "default";

/// Dispatches review queries to the configured backend. The backend is
/// resolved once at construction; calls are independent and share no mutable
/// state, so one router can serve any number of concurrent callers.
pub struct ProviderRouter {
    client: LlmClient,
}

impl ProviderRouter {
    pub fn new(cfg: &LlmConfig) -> Self {
        let client = match cfg {
            LlmConfig::Local { server_url } => LlmClient::new(server_url, LOCAL_MODEL),
            LlmConfig::Remote {
                endpoint,
                model,
                api_key,
            } => {
                let mut client = LlmClient::new(endpoint, model);
                if let Some(key) = api_key {
                    client = client.api_key(key);
                }
                client
            }
            // auto has no health probing yet; it behaves as local
            LlmConfig::Auto { server_url } => LlmClient::new(server_url, LOCAL_MODEL),
        };
        Self { client }
    }

    /// Wrap an already-built client (custom timeout/backoff).
    pub fn with_client(client: LlmClient) -> Self {
        Self { client }
    }

    pub async fn call(&self, prompt: &str) -> String {
        self.client.complete(prompt).await
    }
}
