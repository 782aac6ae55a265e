//! Boundary-level F1 against a gold chunking.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum EvalError {
    #[error("Failed to read evaluation files: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed chunk record in {path}: {source}")]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("No gold .jsonl files found in {0}")]
    EmptyGoldSet(PathBuf),
}

#[derive(Deserialize)]
struct ChunkRecord {
    sentences: Vec<String>,
}

/// Recover boundary positions from a chunk file: each record closes a chunk
/// at the cumulative sentence count.
fn load_boundaries(path: &Path) -> Result<BTreeSet<usize>, EvalError> {
    let raw = fs::read_to_string(path)?;
    let mut indices = BTreeSet::new();
    let mut idx = 0;

    for line in raw.lines().filter(|l| !l.trim().is_empty()) {
        let record: ChunkRecord =
            serde_json::from_str(line).map_err(|source| EvalError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        idx += record.sentences.len();
        indices.insert(idx);
    }
    Ok(indices)
}

fn jsonl_files(dir: &Path) -> Result<Vec<PathBuf>, EvalError> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().is_some_and(|ext| ext == "jsonl"))
        .collect();
    files.sort();
    Ok(files)
}

/// Compare predicted chunk files against gold files of the same name and
/// return the F1 over the union of their boundary positions.
pub fn evaluate(gold_dir: &Path, pred_dir: &Path) -> Result<f64, EvalError> {
    let gold_files = jsonl_files(gold_dir)?;
    if gold_files.is_empty() {
        return Err(EvalError::EmptyGoldSet(gold_dir.to_path_buf()));
    }

    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut missed = 0usize;

    for gold_path in &gold_files {
        let file_name = gold_path.file_name().unwrap_or_default();
        let pred_path = pred_dir.join(file_name);

        let gold = load_boundaries(gold_path)?;
        let pred = load_boundaries(&pred_path)?;
        debug!(file = %pred_path.display(), gold = gold.len(), pred = pred.len(), "scoring");

        for idx in gold.union(&pred) {
            match (gold.contains(idx), pred.contains(idx)) {
                (true, true) => tp += 1,
                (false, true) => fp += 1,
                (true, false) => missed += 1,
                (false, false) => unreachable!(),
            }
        }
    }

    let denom = 2 * tp + fp + missed;
    if denom == 0 {
        return Ok(0.0);
    }
    Ok(2.0 * tp as f64 / denom as f64)
}
