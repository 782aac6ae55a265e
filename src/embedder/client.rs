// client.rs - HTTP client for the sentence-embedding service

use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use super::types::{EmbeddingRequest, EmbeddingResponse};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// One handle per device; obtained through [`super::ModelRegistry`] so
/// concurrent pipeline steps share a single client per device.
pub struct EmbeddingClient {
    http: Client,
    endpoint: String,
    device: String,
}

impl EmbeddingClient {
    pub fn new(endpoint: impl Into<String>, device: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            endpoint: endpoint.into(),
            device: device.into(),
        }
    }

    pub fn device(&self) -> &str {
        &self.device
    }

    /// Embed a batch of sentences, in order. One vector comes back per input
    /// sentence; shape violations surface when the detector checks counts.
    pub async fn embed(&self, texts: Vec<String>) -> anyhow::Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!(batch = texts.len(), device = %self.device, "embedding batch");
        let req = EmbeddingRequest {
            texts,
            device: self.device.clone(),
        };
        let res: EmbeddingResponse = self
            .http
            .post(format!("{}/embed", self.endpoint))
            .json(&req)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(res.embeddings)
    }
}
