//! Groups sentences into topic chunks from closing boundary flags.

use serde::{Deserialize, Serialize};

/// A contiguous run of sentences on one topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub sentences: Vec<String>,
}

impl Chunk {
    /// Full chunk text: the sentences joined with no separator.
    pub fn text(&self) -> String {
        self.sentences.concat()
    }
}

/// Assemble chunks from per-sentence closing flags. A true flag at a
/// position closes the chunk ending at that sentence (inclusive); trailing
/// sentences after the last flag form a final chunk.
///
/// The emitted chunks partition the input: concatenating their sentence runs
/// reproduces the input sequence exactly, and no chunk is empty.
pub fn build_chunks(sentences: &[String], boundaries: &[bool]) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for (sentence, &closes) in sentences.iter().zip(boundaries) {
        current.push(sentence.clone());
        if closes {
            chunks.push(Chunk {
                sentences: std::mem::take(&mut current),
            });
        }
    }

    if !current.is_empty() {
        chunks.push(Chunk { sentences: current });
    }

    chunks
}
