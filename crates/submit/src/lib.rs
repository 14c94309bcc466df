//! Observation submission flow: classify, chunk-upload, finalize.
//!
//! This crate implements the client-side upload pipeline for the
//! AstroShare platform. It is a library crate with no UI dependencies;
//! the presentation layer hands it a filled [`SubmissionForm`] and drains
//! the event channel for live progress.
//!
//! # Pipeline
//!
//! 1. **Classify**: route every file by size. Over 5 MiB goes through
//!    the chunked protocol, the rest rides in the finalize request.
//! 2. **Fan-out**: start all chunked uploads together. Each file runs
//!    init, chunks, complete strictly in order within itself.
//! 3. **Fan-in**: wait for every upload to settle, aggregating progress
//!    across files into one percentage.
//! 4. **Finalize**: on zero failures, send one multipart request with
//!    chunked-file paths, small-file bytes, and the metadata groups.

pub mod api;
pub mod assemble;
pub mod chunk_upload;
pub mod classify;
pub mod error;
pub mod http;
pub mod submit;
pub mod types;

// Re-export primary types for convenience.
pub use api::{FinalizePart, UploadApi};
pub use chunk_upload::ChunkUpload;
pub use classify::{Classified, classify};
pub use error::SubmitError;
pub use http::{ApiConfig, HttpUploadApi};
pub use submit::SubmitOrchestrator;
pub use types::{
    CompletedUpload, FilePayload, ObservationMetadata, SubmissionForm, SubmitEvent, TaskEvent,
    UploadResults, UploadTask, detect_content_type,
};
