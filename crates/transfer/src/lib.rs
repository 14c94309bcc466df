//! Chunk slicing and progress arithmetic for uploads.
//!
//! This crate is pure computation: byte-range slicing of an in-memory
//! payload into fixed 1 MiB chunks, chunk-count math, and the per-file
//! progress table the orchestrator aggregates. Network transfer lives in
//! `astroshare-submit`.

mod chunked;
mod progress;

pub use chunked::{ChunkSlice, ChunkSlicer, chunk_count};
pub use progress::{ProgressTable, progress_percent};

/// Errors produced by the transfer crate.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error("empty file: {0}")]
    EmptyFile(String),
}
