//! End-to-end run: file -> sentences -> embeddings -> boundaries -> chunks.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::info;

use crate::builder::build_chunks;
use crate::config::Config;
use crate::detector;
use crate::embedder::{Batcher, ModelRegistry};
use crate::provider::ProviderRouter;
use crate::splitter::stream_sentences;
use crate::writer::write_chunks;

/// Translate detector flags ("boundary before sentence i") into the closing
/// flags the builder consumes ("chunk ends at sentence i").
pub fn closing_flags(before: &[bool]) -> Vec<bool> {
    let n = before.len();
    let mut closes = vec![false; n];
    for i in 1..n {
        closes[i - 1] = before[i];
    }
    closes
}

/// Run the whole pipeline over one text file and return the output path.
pub async fn run(
    input: &Path,
    cfg: &Config,
    registry: &ModelRegistry,
    output: Option<PathBuf>,
) -> anyhow::Result<PathBuf> {
    let sentences = stream_sentences(input)
        .with_context(|| format!("Failed to read input file {}", input.display()))?;
    info!(sentences = sentences.len(), input = %input.display(), "split input");

    let client = registry.client(&cfg.runtime.device);
    let batcher = Batcher::new(cfg.runtime.batch_size.min(registry.model().max_batch));
    let mut embeddings = Vec::with_capacity(sentences.len());
    for batch in batcher.split(&sentences) {
        let vectors = client
            .embed(batch.to_vec())
            .await
            .context("Embedding request failed")?;
        embeddings.extend(vectors);
    }

    let boundaries = if cfg.detector.use_llm_review {
        let router = ProviderRouter::new(&cfg.llm);
        detector::detect_boundaries_with_review(
            &embeddings,
            &sentences,
            &cfg.detector,
            &router,
            cfg.runtime.llm_concurrency,
        )
        .await?
    } else {
        detector::detect_boundaries(&embeddings, &sentences, &cfg.detector)?
    };

    let chunks = build_chunks(&sentences, &closing_flags(&boundaries));

    let out_path = output.unwrap_or_else(|| input.with_extension("chunks.jsonl"));
    write_chunks(&out_path, &chunks)
        .with_context(|| format!("Failed to write {}", out_path.display()))?;
    info!(chunks = chunks.len(), output = %out_path.display(), "chunking complete");

    Ok(out_path)
}
