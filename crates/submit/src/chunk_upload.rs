//! Per-file chunked upload driver: init → chunks → complete.

use astroshare_protocol::messages::{CompleteChunkUploadRequest, InitChunkUploadRequest};
use astroshare_transfer::{ChunkSlicer, progress_percent};
use tokio::sync::mpsc;
use tracing::debug;

use crate::api::UploadApi;
use crate::error::SubmitError;
use crate::types::{CompletedUpload, TaskEvent, UploadTask};

/// Drives one file through the three-phase chunk protocol.
///
/// Chunks are strictly sequential: the next request starts only after the
/// previous one resolved, so at most one chunk per file is in flight and
/// at most one chunk slice is borrowed at a time. Any failure is terminal
/// for this file; there is no retry within a submission attempt.
pub struct ChunkUpload<'a> {
    api: &'a dyn UploadApi,
}

impl<'a> ChunkUpload<'a> {
    pub fn new(api: &'a dyn UploadApi) -> Self {
        Self { api }
    }

    /// Uploads one task, emitting a `Progress` event after every accepted
    /// chunk. Returns the server-side path of the reassembled file.
    pub async fn run(
        &self,
        task: &UploadTask,
        events_tx: &mpsc::Sender<TaskEvent>,
    ) -> Result<CompletedUpload, SubmitError> {
        let payload = &task.payload;
        let mut slicer = ChunkSlicer::new(&payload.data, &payload.file_name)?;
        let total_chunks = slicer.total_chunks();

        debug!(
            file_id = %task.file_id,
            name = %payload.file_name,
            size = payload.size(),
            total_chunks,
            "starting chunked upload"
        );

        let init_req = InitChunkUploadRequest {
            file_name: payload.file_name.clone(),
            file_size: payload.size(),
            file_type: payload.content_type.clone(),
            total_chunks,
            upload_type: payload.kind,
            file_id: task.file_id.clone(),
        };
        let init = self
            .api
            .init(init_req)
            .await
            .map_err(|e| SubmitError::Init(e.to_string()))?;
        let upload_id = init.upload_id;

        let mut accepted = 0u32;
        while let Some(chunk) = slicer.next_chunk() {
            self.api
                .send_chunk(&upload_id, chunk.index, chunk.data)
                .await
                .map_err(|e| SubmitError::Chunk {
                    index: chunk.index,
                    message: e.to_string(),
                })?;

            accepted += 1;
            let percent = progress_percent(accepted, total_chunks);
            let _ = events_tx
                .send(TaskEvent::Progress {
                    file_id: task.file_id.clone(),
                    percent,
                })
                .await;
        }

        let complete_req = CompleteChunkUploadRequest {
            upload_id,
            file_name: payload.file_name.clone(),
            file_type: payload.content_type.clone(),
        };
        let resp = self
            .api
            .complete(complete_req)
            .await
            .map_err(|e| SubmitError::Complete(e.to_string()))?;

        debug!(file_id = %task.file_id, path = %resp.file_path, "chunked upload complete");

        Ok(CompletedUpload {
            file_id: task.file_id.clone(),
            file_path: resp.file_path,
        })
    }
}
