//! Seams between the gallery components and the outside world
//!
//! The components never talk to HTTP or to a display directly. They are handed a
//! [`MediaBackend`] for the network, a [`Surface`] to render elements into and a
//! [`Notifier`] for user-facing notices.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::{GalleryElement, Notice, SelectedFile, UploadResult};

/// Remote storage the gallery lists and uploads to.
#[async_trait]
pub trait MediaBackend: Send + Sync {
    /// Names of every stored file, in server order.
    async fn list_files(&self) -> Result<Vec<String>, BackendError>;

    /// Send a non-empty selection and return the backend's per-file report.
    async fn upload(&self, files: &[SelectedFile]) -> Result<UploadResult, BackendError>;
}

/// Display surface shared by the preview renderer and the gallery loader.
///
/// Previews are appended; gallery loads replace the whole content.
pub trait Surface: Send + Sync {
    fn clear(&self);

    fn append(&self, element: GalleryElement);

    /// Swap the whole content in one step.
    fn replace(&self, elements: Vec<GalleryElement>);

    /// Snapshot of the current content.
    fn elements(&self) -> Vec<GalleryElement>;
}

/// Receives user-facing notices.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}
