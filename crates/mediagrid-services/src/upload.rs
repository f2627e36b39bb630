//! Upload submission.
//!
//! One submission: validate the selection, start local previews, send the files,
//! report the per-file result and refresh the gallery. Nothing is retried and
//! concurrent submissions are not serialized; whichever render finishes last
//! owns the surface.

use std::sync::Arc;

use async_trait::async_trait;
use mediagrid_core::{
    BackendError, GalleryState, MediaBackend, Notice, Notifier, SelectedFile, Surface,
    UploadResult,
};
use serde::Serialize;

use crate::form::{SubmitEvent, SubmitHandler};
use crate::gallery::GalleryLoader;
use crate::preview::{PreviewHandle, PreviewRenderer};

/// How a submission ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmissionOutcome {
    /// Nothing was selected; no request was made.
    EmptySelection,
    /// The backend accepted the request. `gallery` is the refreshed listing.
    Completed {
        result: UploadResult,
        gallery: GalleryState,
    },
    /// The backend answered with a non-success status.
    Rejected { status: u16, body: String },
    /// The request did not complete or its answer was unreadable.
    Unreachable,
}

/// Result of one submission plus the preview tasks it started.
#[derive(Debug)]
pub struct Submission {
    pub outcome: SubmissionOutcome,
    pub previews: PreviewHandle,
}

#[derive(Clone)]
pub struct UploadSubmitter {
    backend: Arc<dyn MediaBackend>,
    surface: Arc<dyn Surface>,
    notifier: Arc<dyn Notifier>,
    previews: PreviewRenderer,
    gallery: GalleryLoader,
}

impl UploadSubmitter {
    pub fn new(
        backend: Arc<dyn MediaBackend>,
        surface: Arc<dyn Surface>,
        notifier: Arc<dyn Notifier>,
        previews: PreviewRenderer,
        gallery: GalleryLoader,
    ) -> Self {
        Self {
            backend,
            surface,
            notifier,
            previews,
            gallery,
        }
    }

    pub async fn submit(&self, files: Vec<SelectedFile>) -> Submission {
        if files.is_empty() {
            self.notifier.notify(Notice::EmptySelection);
            return Submission {
                outcome: SubmissionOutcome::EmptySelection,
                previews: PreviewHandle::default(),
            };
        }

        self.surface.clear();
        let previews = self.previews.render(&files);

        tracing::info!(files = files.len(), "Uploading selection");
        let outcome = match self.backend.upload(&files).await {
            Ok(result) => {
                let selected: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
                let result = result.reconcile(&selected);

                if let Some(message) = &result.message {
                    tracing::info!(message = %message, "Upload finished");
                }
                if !result.uploaded.is_empty() {
                    tracing::info!(uploaded = ?result.uploaded, "Files uploaded");
                }
                if result.has_failures() {
                    tracing::error!(failed = ?result.failed, "Some files failed to upload");
                }

                self.notifier.notify(Notice::UploadReport(result.clone()));
                let gallery = self.gallery.load().await;

                SubmissionOutcome::Completed { result, gallery }
            }
            Err(BackendError::Status { status, body }) => {
                tracing::error!(status, body = %body, "Upload rejected");
                self.notifier.notify(Notice::UploadRejected {
                    status,
                    body: body.clone(),
                });
                SubmissionOutcome::Rejected { status, body }
            }
            Err(e) => {
                tracing::error!(error = %e, "Upload did not complete");
                self.notifier.notify(Notice::Connectivity);
                SubmissionOutcome::Unreachable
            }
        };

        Submission { outcome, previews }
    }
}

#[async_trait]
impl SubmitHandler for UploadSubmitter {
    async fn on_submit(&self, event: SubmitEvent) -> Submission {
        self.submit(event.files).await
    }
}
