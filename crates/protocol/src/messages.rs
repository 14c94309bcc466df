//! Request and response payloads for the chunk-upload endpoints.
//!
//! The chunk transfer itself (`/api/chunk-upload/chunk`) is multipart, not
//! JSON; its field names live in the submit crate where the form is
//! assembled. Everything JSON-shaped is here.

use serde::{Deserialize, Serialize};

use crate::types::FileKind;

/// Opens a chunk session for one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitChunkUploadRequest {
    pub file_name: String,
    pub file_size: u64,
    /// MIME type of the file.
    pub file_type: String,
    pub total_chunks: u32,
    pub upload_type: FileKind,
    pub file_id: String,
}

/// Server acknowledgement of an opened chunk session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitChunkUploadResponse {
    pub upload_id: String,
}

/// Closes a chunk session after the last chunk was accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteChunkUploadRequest {
    pub upload_id: String,
    pub file_name: String,
    pub file_type: String,
}

/// Server-side path of the reassembled file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteChunkUploadResponse {
    pub file_path: String,
}

/// Success payload of `/api/finalize-upload`.
///
/// Unlike the chunk endpoints this one answers in snake_case: the server
/// sends `image_id`, not `imageId`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalizeResponse {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_id: Option<String>,
}

/// Error body the platform API returns on non-success statuses.
///
/// The backend is inconsistent: auth failures use `message`, validation
/// and server errors use `error`. Both are captured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
}

impl ApiErrorBody {
    /// Returns whichever message field the server populated.
    pub fn into_message(self) -> String {
        if !self.message.is_empty() {
            self.message
        } else {
            self.error
        }
    }
}
