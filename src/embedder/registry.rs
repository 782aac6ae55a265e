// registry.rs - explicit per-device cache of embedding handles

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::client::EmbeddingClient;
use super::model::EmbeddingModelInfo;

/// Owns the embedding handles for a run. One shared client is built lazily
/// per device string and reused until the registry is dropped; callers hold
/// `Arc`s, so teardown is explicit and nothing hides in module-level state.
pub struct ModelRegistry {
    endpoint: String,
    model: EmbeddingModelInfo,
    handles: Mutex<HashMap<String, Arc<EmbeddingClient>>>,
}

impl ModelRegistry {
    pub fn new(endpoint: impl Into<String>, model: EmbeddingModelInfo) -> Self {
        Self {
            endpoint: endpoint.into(),
            model,
            handles: Mutex::new(HashMap::new()),
        }
    }

    pub fn model(&self) -> &EmbeddingModelInfo {
        &self.model
    }

    /// Fetch the shared client for a device, building it on first use.
    pub fn client(&self, device: &str) -> Arc<EmbeddingClient> {
        let mut handles = self.handles.lock().expect("registry lock poisoned");
        handles
            .entry(device.to_string())
            .or_insert_with(|| {
                debug!(device, endpoint = %self.endpoint, "initializing embedding handle");
                Arc::new(EmbeddingClient::new(&self.endpoint, device))
            })
            .clone()
    }
}
