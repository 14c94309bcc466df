//! Transport trait for the upload API.
//!
//! `UploadApi` is implemented over HTTP by [`crate::http::HttpUploadApi`].
//! Using a trait keeps the pipeline decoupled from the transport and
//! testable with mocks.

use std::future::Future;
use std::pin::Pin;

use astroshare_protocol::messages::{
    CompleteChunkUploadRequest, CompleteChunkUploadResponse, FinalizeResponse,
    InitChunkUploadRequest, InitChunkUploadResponse,
};

use crate::error::SubmitError;

/// One part of the multipart finalize request.
///
/// Transport-neutral so that tests and the wire-compat suite can inspect
/// the assembled form without an HTTP client in the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinalizePart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        file_name: String,
        content_type: String,
        data: Vec<u8>,
    },
}

impl FinalizePart {
    pub fn name(&self) -> &str {
        match self {
            FinalizePart::Text { name, .. } | FinalizePart::File { name, .. } => name,
        }
    }
}

/// Abstract connection to the upload API.
pub trait UploadApi: Send + Sync {
    /// Opens a chunk session; must yield an `uploadId`.
    fn init<'a>(
        &'a self,
        req: InitChunkUploadRequest,
    ) -> Pin<Box<dyn Future<Output = Result<InitChunkUploadResponse, SubmitError>> + Send + 'a>>;

    /// Transfers one chunk of an open session.
    fn send_chunk<'a>(
        &'a self,
        upload_id: &'a str,
        chunk_index: u32,
        data: &'a [u8],
    ) -> Pin<Box<dyn Future<Output = Result<(), SubmitError>> + Send + 'a>>;

    /// Closes a chunk session; must yield the server-side `filePath`.
    fn complete<'a>(
        &'a self,
        req: CompleteChunkUploadRequest,
    ) -> Pin<Box<dyn Future<Output = Result<CompleteChunkUploadResponse, SubmitError>> + Send + 'a>>;

    /// Submits the assembled observation in one multipart request.
    fn finalize<'a>(
        &'a self,
        parts: Vec<FinalizePart>,
    ) -> Pin<Box<dyn Future<Output = Result<FinalizeResponse, SubmitError>> + Send + 'a>>;
}
