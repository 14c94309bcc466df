//! Size-based routing of files into chunked tasks and direct inclusion.

use std::time::{SystemTime, UNIX_EPOCH};

use astroshare_protocol::constants::{CHUNK_THRESHOLD, MAIN_IMAGE_DIRECT_LIMIT};
use astroshare_protocol::types::FileKind;
use tracing::debug;

use crate::error::SubmitError;
use crate::types::{FilePayload, UploadTask};

/// Outcome of one classification pass.
#[derive(Debug, Default)]
pub struct Classified {
    /// Files routed through the chunked protocol, with assigned ids.
    pub chunked: Vec<UploadTask>,
    /// Files small enough to ride in the finalize request.
    pub direct: Vec<FilePayload>,
}

/// Routes every file in the declared group list by size.
///
/// A submission must carry a main image; classification fails before
/// any network call when it is absent. Files strictly over the 5 MiB
/// threshold become chunked tasks; the rest are marked for direct
/// inclusion. The chunk threshold takes priority over the legacy
/// 50 MiB main-image ceiling, so the ceiling can never trigger on the
/// direct path.
pub fn classify(groups: Vec<(FileKind, Vec<FilePayload>)>) -> Result<Classified, SubmitError> {
    let has_main_image = groups
        .iter()
        .any(|(kind, files)| *kind == FileKind::MainImage && !files.is_empty());
    if !has_main_image {
        return Err(SubmitError::MissingMainImage);
    }

    let now = unix_millis();
    let mut out = Classified::default();

    for (kind, files) in groups {
        for (index, payload) in files.into_iter().enumerate() {
            debug_assert_eq!(payload.kind, kind);
            if payload.size() > CHUNK_THRESHOLD {
                let file_id = task_file_id(kind, index, now);
                debug!(
                    file_id = %file_id,
                    name = %payload.file_name,
                    size = payload.size(),
                    "routing file through chunked upload"
                );
                out.chunked.push(UploadTask { file_id, payload });
            } else {
                debug_assert!(payload.size() <= MAIN_IMAGE_DIRECT_LIMIT);
                out.direct.push(payload);
            }
        }
    }

    Ok(out)
}

/// Builds `<kind>-<index?>-<timestamp>`; single-file kinds omit the index.
fn task_file_id(kind: FileKind, index: usize, timestamp_millis: u128) -> String {
    if kind.is_multi() {
        format!("{}-{index}-{timestamp_millis}", kind.id_prefix())
    } else {
        format!("{}-{timestamp_millis}", kind.id_prefix())
    }
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}
