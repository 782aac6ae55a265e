//! Writes chunks as JSON lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;
use thiserror::Error;

use crate::builder::Chunk;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Failed to write chunk file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode chunk record: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ChunkRecord<'a> {
    text: String,
    sentences: &'a [String],
}

/// Write one `{"text", "sentences"}` object per line.
pub fn write_chunks(path: impl AsRef<Path>, chunks: &[Chunk]) -> Result<(), WriteError> {
    let mut out = BufWriter::new(File::create(path)?);

    for chunk in chunks {
        let record = ChunkRecord {
            text: chunk.text(),
            sentences: &chunk.sentences,
        };
        serde_json::to_writer(&mut out, &record)?;
        out.write_all(b"\n")?;
    }

    out.flush()?;
    Ok(())
}
