pub mod batcher;
pub mod client;
pub mod model;
pub mod registry;
pub mod types;

#[cfg(test)]
mod tests;

pub use batcher::Batcher;
pub use client::EmbeddingClient;
pub use model::EmbeddingModelInfo;
pub use registry::ModelRegistry;
pub use types::{EmbeddingRequest, EmbeddingResponse};
