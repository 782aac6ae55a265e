// model.rs - metadata about the sentence-embedding model in use

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub dim: usize,
    pub max_batch: usize,
}

impl EmbeddingModelInfo {
    pub fn new(name: impl Into<String>, dim: usize, max_batch: usize) -> Self {
        Self {
            name: name.into(),
            dim,
            max_batch,
        }
    }

    pub fn minilm_l6() -> Self {
        Self::new("sentence-transformers/all-MiniLM-L6-v2", 384, 32)
    }
}

impl Default for EmbeddingModelInfo {
    fn default() -> Self {
        Self::minilm_l6()
    }
}
