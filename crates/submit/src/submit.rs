//! Submission orchestrator: classify, fan out, fan in, finalize.
//!
//! Large files upload concurrently through the chunk protocol; the
//! finalize request is sent only after every one of them settled, and
//! only if none failed. Task events are aggregated into overall
//! progress before they reach the presentation layer.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::mpsc;
use tracing::{error, info, warn};

use astroshare_protocol::messages::FinalizeResponse;
use astroshare_transfer::ProgressTable;

use crate::api::UploadApi;
use crate::assemble::assemble_finalize;
use crate::chunk_upload::ChunkUpload;
use crate::classify::classify;
use crate::error::SubmitError;
use crate::types::{SubmissionForm, SubmitEvent, TaskEvent, UploadResults};

/// Orchestrates one observation submission end to end.
pub struct SubmitOrchestrator {
    api: Arc<dyn UploadApi>,
    events_tx: mpsc::Sender<SubmitEvent>,
    events_rx: Option<mpsc::Receiver<SubmitEvent>>,
}

impl SubmitOrchestrator {
    pub fn new(api: Arc<dyn UploadApi>) -> Self {
        let (events_tx, events_rx) = mpsc::channel(256);
        Self {
            api,
            events_tx,
            events_rx: Some(events_rx),
        }
    }

    /// Takes the event receiver. Can only be called once.
    pub fn take_events(&mut self) -> Option<mpsc::Receiver<SubmitEvent>> {
        self.events_rx.take()
    }

    /// Runs a full submission attempt.
    ///
    /// A form without a main image is rejected before any network call.
    /// Every chunked upload runs to completion or failure before finalize
    /// is considered; one failure never interrupts the others. If any
    /// upload failed, finalize is withheld and the per-file errors are
    /// returned in [`SubmitError::Submission`].
    pub async fn submit(&self, form: SubmissionForm) -> Result<FinalizeResponse, SubmitError> {
        let (groups, metadata) = form.into_groups();
        let classified = classify(groups)?;

        info!(
            chunked = classified.chunked.len(),
            direct = classified.direct.len(),
            "starting submission"
        );

        let mut table = ProgressTable::new();
        for task in &classified.chunked {
            table.register(&task.file_id);
        }

        let (task_tx, mut task_rx) = mpsc::channel::<TaskEvent>(256);

        let api = self.api.as_ref();
        let chunked = &classified.chunked;
        let uploads = async move {
            let futures = chunked.iter().map(|task| {
                let tx = task_tx.clone();
                async move {
                    let driver = ChunkUpload::new(api);
                    match driver.run(task, &tx).await {
                        Ok(done) => {
                            let _ = tx
                                .send(TaskEvent::Completed {
                                    file_id: done.file_id.clone(),
                                    path: done.file_path.clone(),
                                })
                                .await;
                            Ok(done)
                        }
                        Err(e) => {
                            let message = e.to_string();
                            error!(file_id = %task.file_id, error = %message, "chunked upload failed");
                            let _ = tx
                                .send(TaskEvent::Failed {
                                    file_id: task.file_id.clone(),
                                    error: message.clone(),
                                })
                                .await;
                            Err((task.file_id.clone(), message))
                        }
                    }
                }
            });
            let outcomes = join_all(futures).await;
            drop(task_tx);
            outcomes
        };

        // Drains task events while the uploads run, so the bounded
        // channel never stalls a sender. Outward events use try_send:
        // a slow or absent consumer drops events, never the submission.
        let events_tx = self.events_tx.clone();
        let aggregate = async move {
            while let Some(event) = task_rx.recv().await {
                match event {
                    TaskEvent::Progress { file_id, percent } => {
                        table.set(&file_id, percent);
                        let _ = events_tx.try_send(SubmitEvent::Progress {
                            percent: table.overall(),
                        });
                    }
                    TaskEvent::Completed { file_id, path } => {
                        let _ = events_tx.try_send(SubmitEvent::FileCompleted { file_id, path });
                    }
                    TaskEvent::Failed { file_id, error } => {
                        let _ = events_tx.try_send(SubmitEvent::FileFailed { file_id, error });
                    }
                }
            }
        };

        let (outcomes, ()) = tokio::join!(uploads, aggregate);

        let mut results = UploadResults::default();
        for outcome in outcomes {
            match outcome {
                Ok(done) => {
                    results.completed.insert(done.file_id, done.file_path);
                }
                Err((file_id, message)) => {
                    results.failed.insert(file_id, message);
                }
            }
        }

        if !results.failed.is_empty() {
            // Already-reassembled files stay on the server; a later
            // attempt re-runs their uploads under fresh file ids.
            let orphaned: Vec<&String> = results.completed.keys().collect();
            warn!(
                failed = results.failed.len(),
                ?orphaned,
                "submission aborted, finalize withheld"
            );
            return Err(SubmitError::Submission {
                failed: results.failed,
            });
        }

        let parts = assemble_finalize(&classified.direct, &results.completed, &metadata)?;
        let resp = self.api.finalize(parts).await?;
        info!(message = %resp.message, image_id = ?resp.image_id, "observation submitted");
        Ok(resp)
    }
}
