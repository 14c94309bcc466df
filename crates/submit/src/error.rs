//! Submission error types.

use std::collections::HashMap;

/// Errors produced during observation submission.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("missing credentials: a bearer token is required")]
    MissingCredentials,

    #[error("missing main image: a submission requires one")]
    MissingMainImage,

    #[error("upload initialization failed: {0}")]
    Init(String),

    #[error("chunk {index} transfer failed: {message}")]
    Chunk { index: u32, message: String },

    #[error("upload completion failed: {0}")]
    Complete(String),

    /// One or more file uploads failed; the finalize request was withheld.
    #[error("submission aborted: {} file upload(s) failed", failed.len())]
    Submission { failed: HashMap<String, String> },

    #[error("server error {status}: {message}")]
    Server { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Transfer(#[from] astroshare_transfer::TransferError),
}
