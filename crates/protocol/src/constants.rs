//! Fixed parameters of the upload protocol.
//!
//! These values are part of the server contract and must not be tuned
//! client-side: the server reassembles files assuming 1 MiB chunks, and
//! the routing thresholds match what the platform backend enforces.

/// Size of a single chunk: 1 MiB.
pub const CHUNK_SIZE: usize = 1024 * 1024;

/// Files strictly larger than this (5 MiB) go through the chunked protocol.
pub const CHUNK_THRESHOLD: u64 = 5 * 1024 * 1024;

/// Legacy ceiling (50 MiB) for direct inclusion of the main image.
///
/// The chunk threshold takes priority: anything over 5 MiB is chunked, so
/// a directly-included main image can never reach this limit. Kept as a
/// guard in the direct path to preserve the documented server contract.
pub const MAIN_IMAGE_DIRECT_LIMIT: u64 = 50 * 1024 * 1024;

/// Starts a chunk session.
pub const CHUNK_UPLOAD_INIT_PATH: &str = "/api/chunk-upload/init";

/// Transfers one chunk of an open session.
pub const CHUNK_UPLOAD_CHUNK_PATH: &str = "/api/chunk-upload/chunk";

/// Closes a chunk session and yields the server-side file path.
pub const CHUNK_UPLOAD_COMPLETE_PATH: &str = "/api/chunk-upload/complete";

/// Submits the assembled observation (metadata + small files + chunked paths).
pub const FINALIZE_UPLOAD_PATH: &str = "/api/finalize-upload";
