use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadFailed(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] serde_json::Error),

    #[error("Remote provider requested but config selects '{selected}'")]
    RemoteNotConfigured { selected: &'static str },
}

/// Runtime knobs shared across the pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Device the embedding service binds its model to (cpu / cuda / mps)
    pub device: String,
    /// Sentences per embed request
    pub batch_size: usize,
    /// Max in-flight LLM review calls
    pub llm_concurrency: usize,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            device: "cpu".to_string(),
            batch_size: 32,
            llm_concurrency: 1,
        }
    }
}

/// Numeric parameters of the boundary detector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    pub theta_high: f32,
    /// Similarity floor for the adjacency stage
    pub theta_low: f32,
    /// Moving-average window, in sentences
    pub k: usize,
    /// Anomaly multiplier on the residual sigma
    pub tau: f32,
    /// Votes per reviewed position
    pub n_vote: usize,
    pub use_llm_review: bool,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            theta_high: 0.85,
            theta_low: 0.55,
            k: 5,
            tau: 3.5,
            n_vote: 3,
            use_llm_review: false,
        }
    }
}

/// Which backend answers review queries. Each variant carries only the
/// settings its backend needs, so a selected provider can never be missing
/// its connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider", rename_all = "lowercase")]
pub enum LlmConfig {
    Local {
        #[serde(default = "default_server_url")]
        server_url: String,
    },
    Remote {
        endpoint: String,
        model: String,
        #[serde(default)]
        api_key: Option<String>,
    },
    /// Placeholder mode: routes to the local backend. No health-based
    /// switching is implemented.
    Auto {
        #[serde(default = "default_server_url")]
        server_url: String,
    },
}

fn default_server_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

impl Default for LlmConfig {
    fn default() -> Self {
        LlmConfig::Local {
            server_url: default_server_url(),
        }
    }
}

impl LlmConfig {
    fn selected(&self) -> &'static str {
        match self {
            LlmConfig::Local { .. } => "local",
            LlmConfig::Remote { .. } => "remote",
            LlmConfig::Auto { .. } => "auto",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub runtime: RuntimeConfig,
    pub llm: LlmConfig,
    pub detector: DetectorConfig,
    pub embedding: EmbeddingConfig,
}

/// Where the embedding service lives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    pub endpoint: String,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            endpoint: "http://127.0.0.1:18115".to_string(),
        }
    }
}

impl Config {
    /// Fails unless the loaded config already carries remote settings;
    /// a forced remote run with no endpoint/model is not representable.
    pub fn require_remote(&self) -> Result<(), ConfigError> {
        match &self.llm {
            LlmConfig::Remote { .. } => Ok(()),
            other => Err(ConfigError::RemoteNotConfigured {
                selected: other.selected(),
            }),
        }
    }
}

pub fn load_config(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let cfg = serde_json::from_str(&raw)?;
    Ok(cfg)
}
