//! Wire protocol types for the AstroShare upload API.
//!
//! The platform server predates this client, so every payload here must
//! serialize exactly the way the server expects: camelCase field names,
//! chunk counts computed with the fixed 1 MiB chunk size, and the form
//! keys listed in [`FileKind`].

pub mod constants;
pub mod messages;
pub mod types;

pub use constants::{
    CHUNK_SIZE, CHUNK_THRESHOLD, CHUNK_UPLOAD_CHUNK_PATH, CHUNK_UPLOAD_COMPLETE_PATH,
    CHUNK_UPLOAD_INIT_PATH, FINALIZE_UPLOAD_PATH, MAIN_IMAGE_DIRECT_LIMIT,
};
pub use messages::{
    ApiErrorBody, CompleteChunkUploadRequest, CompleteChunkUploadResponse, FinalizeResponse,
    InitChunkUploadRequest, InitChunkUploadResponse,
};
pub use types::{
    CelestialObjectLink, FileKind, GearItem, ImageDetails, LocationInfo, SessionInfo,
};
