//! Data types for the submission flow.

use std::collections::HashMap;
use std::path::Path;

use astroshare_protocol::types::{
    CelestialObjectLink, FileKind, GearItem, ImageDetails, LocationInfo, SessionInfo,
};

use crate::error::SubmitError;

/// One file destined for transfer, with its bytes resident in memory.
#[derive(Debug, Clone)]
pub struct FilePayload {
    pub kind: FileKind,
    pub file_name: String,
    /// MIME type sent to the server.
    pub content_type: String,
    pub data: Vec<u8>,
}

impl FilePayload {
    pub fn new(
        kind: FileKind,
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        data: Vec<u8>,
    ) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Reads a payload from disk, inferring the MIME type from the
    /// file extension (`application/octet-stream` when unknown).
    pub fn from_path(kind: FileKind, path: &Path) -> Result<Self, SubmitError> {
        let data = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());
        let content_type = detect_content_type(path)
            .unwrap_or("application/octet-stream")
            .to_string();
        Ok(Self {
            kind,
            file_name,
            content_type,
            data,
        })
    }

    pub fn size(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Maps a file extension to its MIME type.
pub fn detect_content_type(path: &Path) -> Option<&'static str> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match ext.as_deref() {
        Some("png") => Some("image/png"),
        Some("jpg") | Some("jpeg") => Some("image/jpeg"),
        Some("tif") | Some("tiff") => Some("image/tiff"),
        Some("fit") | Some("fits") => Some("image/fits"),
        Some("cr2") => Some("image/x-canon-cr2"),
        Some("nef") => Some("image/x-nikon-nef"),
        Some("dng") => Some("image/x-adobe-dng"),
        Some("pdf") => Some("application/pdf"),
        Some("txt") => Some("text/plain"),
        _ => None,
    }
}

/// One file's upload unit, tracked by its id through progress,
/// completion, or failure.
#[derive(Debug, Clone)]
pub struct UploadTask {
    /// `<kind>-<index?>-<timestamp-millis>`, unique within a submission.
    pub file_id: String,
    pub payload: FilePayload,
}

/// Metadata groups accompanying the files.
#[derive(Debug, Clone, Default)]
pub struct ObservationMetadata {
    pub image_details: ImageDetails,
    pub location: LocationInfo,
    pub gear: Vec<GearItem>,
    pub session: SessionInfo,
    pub celestial_object: Option<CelestialObjectLink>,
}

/// The filled wizard form handed to the orchestrator.
///
/// Exists only for the duration of one submission attempt; nothing here
/// is persisted or shared across attempts.
#[derive(Debug, Clone, Default)]
pub struct SubmissionForm {
    /// Required by the platform; its absence fails classification.
    pub main_image: Option<FilePayload>,
    pub additional_images: Vec<FilePayload>,
    pub documentation: Vec<FilePayload>,
    pub light_frames: Vec<FilePayload>,
    pub dark_frames: Vec<FilePayload>,
    pub flat_frames: Vec<FilePayload>,
    pub bias_frames: Vec<FilePayload>,
    pub dark_flats: Vec<FilePayload>,
    pub metadata: ObservationMetadata,
}

impl SubmissionForm {
    /// Splits the form into the declared routing list and the metadata.
    ///
    /// The list order matches [`FileKind::ALL`]; classification iterates
    /// it once instead of branching per field.
    pub fn into_groups(self) -> (Vec<(FileKind, Vec<FilePayload>)>, ObservationMetadata) {
        let groups = vec![
            (
                FileKind::MainImage,
                self.main_image.into_iter().collect::<Vec<_>>(),
            ),
            (FileKind::AdditionalImage, self.additional_images),
            (FileKind::Documentation, self.documentation),
            (FileKind::LightFrame, self.light_frames),
            (FileKind::DarkFrame, self.dark_frames),
            (FileKind::FlatFrame, self.flat_frames),
            (FileKind::BiasFrame, self.bias_frames),
            (FileKind::DarkFlat, self.dark_flats),
        ];
        (groups, self.metadata)
    }
}

/// Event emitted by one file's chunked upload.
#[derive(Debug, Clone)]
pub enum TaskEvent {
    /// A chunk was accepted; `percent` covers this file only.
    Progress { file_id: String, percent: u8 },
    /// The file was reassembled server-side at `path`.
    Completed { file_id: String, path: String },
    /// The upload failed; no further chunks were sent for this file.
    Failed { file_id: String, error: String },
}

/// Event surfaced to the presentation layer during a submission.
#[derive(Debug, Clone)]
pub enum SubmitEvent {
    /// Overall percentage: mean across all chunked files.
    Progress { percent: u8 },
    FileCompleted { file_id: String, path: String },
    FileFailed { file_id: String, error: String },
}

/// Successful outcome of one chunked upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedUpload {
    pub file_id: String,
    pub file_path: String,
}

/// Per-task outcomes, inspected only after every task settles.
#[derive(Debug, Clone, Default)]
pub struct UploadResults {
    /// file_id → server-side path.
    pub completed: HashMap<String, String>,
    /// file_id → error message.
    pub failed: HashMap<String, String>,
}
