//! Local previews of selected files.
//!
//! Each file is read and encoded as a `data:` URI in its own task, so previews
//! land on the surface in completion order rather than selection order.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use mediagrid_core::{GalleryElement, MediaKind, Notice, Notifier, SelectedFile, Surface};
use tokio::task::JoinHandle;

/// Encode a local file as a `data:{content_type};base64,...` URI.
pub async fn data_uri(file: &SelectedFile) -> std::io::Result<String> {
    let bytes = tokio::fs::read(&file.path).await?;
    Ok(format!(
        "data:{};base64,{}",
        file.content_type,
        STANDARD.encode(bytes)
    ))
}

/// Preview element for a decoded file. The element kind follows the declared
/// content type, not the extension.
pub fn preview_element(file: &SelectedFile, src: String) -> GalleryElement {
    GalleryElement::Preview {
        kind: MediaKind::from_content_type(&file.content_type),
        src,
        caption: format!("Preview: {}", file.name),
    }
}

/// The decode tasks started by one render call.
///
/// Dropping the handle detaches the tasks; they still run to completion.
#[derive(Debug, Default)]
pub struct PreviewHandle {
    tasks: Vec<JoinHandle<()>>,
}

impl PreviewHandle {
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Wait until every decode task has finished.
    pub async fn wait(self) {
        for task in self.tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Preview task did not complete");
            }
        }
    }
}

#[derive(Clone)]
pub struct PreviewRenderer {
    surface: Arc<dyn Surface>,
    notifier: Arc<dyn Notifier>,
}

impl PreviewRenderer {
    pub fn new(surface: Arc<dyn Surface>, notifier: Arc<dyn Notifier>) -> Self {
        Self { surface, notifier }
    }

    /// Start one decode task per file; each appends its preview when done.
    ///
    /// An empty selection produces a single notice and starts nothing. A file that
    /// cannot be read is left out.
    pub fn render(&self, files: &[SelectedFile]) -> PreviewHandle {
        if files.is_empty() {
            self.notifier.notify(Notice::EmptySelection);
            return PreviewHandle::default();
        }

        let tasks = files
            .iter()
            .cloned()
            .map(|file| {
                let surface = self.surface.clone();
                tokio::spawn(async move {
                    match data_uri(&file).await {
                        Ok(src) => surface.append(preview_element(&file, src)),
                        Err(e) => tracing::warn!(
                            file = %file.name,
                            path = %file.path.display(),
                            error = %e,
                            "Failed to read file for preview"
                        ),
                    }
                })
            })
            .collect();

        PreviewHandle { tasks }
    }
}
