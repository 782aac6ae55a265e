//! Multi-stage topic-boundary detector.
//!
//! Boundary flags here mean "a topic boundary begins immediately before this
//! sentence"; position 0 is therefore never flagged. The chunk builder uses
//! closing flags instead - see [`crate::pipeline::closing_flags`].

mod review;
mod similarity;
mod stages;


pub use similarity::cosine_similarity;

use thiserror::Error;
use tracing::debug;

use crate::config::DetectorConfig;
use crate::provider::ProviderRouter;

#[derive(Debug, Error)]
pub enum DetectorError {
    #[error("Sentence/embedding count mismatch: {sentences} sentences, {embeddings} embeddings")]
    ShapeMismatch { sentences: usize, embeddings: usize },
}

fn check_shape(embeddings: &[Vec<f32>], sentences: &[String]) -> Result<(), DetectorError> {
    if embeddings.len() != sentences.len() {
        return Err(DetectorError::ShapeMismatch {
            sentences: sentences.len(),
            embeddings: embeddings.len(),
        });
    }
    Ok(())
}

fn provisional_flags(embeddings: &[Vec<f32>], cfg: &DetectorConfig) -> Vec<bool> {
    let a = stages::adjacency_flags(embeddings, cfg.theta_low);
    let b = stages::anomaly_flags(embeddings, cfg.k, cfg.tau);
    let combined = stages::combine(&a, &b);
    debug!(
        adjacency = a.iter().filter(|&&f| f).count(),
        anomaly = b.iter().filter(|&&f| f).count(),
        combined = combined.iter().filter(|&&f| f).count(),
        "provisional boundaries"
    );
    combined
}

/// Detect topic boundaries from sentence embeddings, without LLM review.
///
/// Runs the adjacency threshold and windowed anomaly stages, ORs their
/// flags, and suppresses boundaries on degenerate sentences.
pub fn detect_boundaries(
    embeddings: &[Vec<f32>],
    sentences: &[String],
    cfg: &DetectorConfig,
) -> Result<Vec<bool>, DetectorError> {
    check_shape(embeddings, sentences)?;
    let combined = provisional_flags(embeddings, cfg);
    Ok(stages::post_filter(sentences, &combined))
}

/// Like [`detect_boundaries`], with every provisional flag escalated to a
/// majority-vote LLM review before the post-filter runs.
pub async fn detect_boundaries_with_review(
    embeddings: &[Vec<f32>],
    sentences: &[String],
    cfg: &DetectorConfig,
    router: &ProviderRouter,
    concurrency: usize,
) -> Result<Vec<bool>, DetectorError> {
    check_shape(embeddings, sentences)?;
    let combined = provisional_flags(embeddings, cfg);
    let reviewed = review::review_flags(sentences, &combined, router, cfg.n_vote, concurrency).await;
    Ok(stages::post_filter(sentences, &reviewed))
}
