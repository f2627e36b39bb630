//! Form-submission abstraction.
//!
//! An [`UploadForm`] holds the handlers registered for its submit event and
//! dispatches each event to them in registration order. Handlers carry their own
//! dependencies; the form knows nothing about HTTP or rendering.

use std::sync::Arc;

use async_trait::async_trait;
use mediagrid_core::SelectedFile;

use crate::upload::Submission;

/// A submit event carrying the files selected at submission time.
#[derive(Debug, Clone, Default)]
pub struct SubmitEvent {
    pub files: Vec<SelectedFile>,
}

impl SubmitEvent {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }
}

#[async_trait]
pub trait SubmitHandler: Send + Sync {
    async fn on_submit(&self, event: SubmitEvent) -> Submission;
}

#[derive(Default, Clone)]
pub struct UploadForm {
    handlers: Vec<Arc<dyn SubmitHandler>>,
}

impl UploadForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_submit(&mut self, handler: Arc<dyn SubmitHandler>) -> &mut Self {
        self.handlers.push(handler);
        self
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Dispatch one event to every registered handler, one after the other.
    pub async fn submit(&self, event: SubmitEvent) -> Vec<Submission> {
        if self.handlers.is_empty() {
            tracing::warn!("Form submitted with no handler registered");
        }

        let mut submissions = Vec::with_capacity(self.handlers.len());
        for handler in &self.handlers {
            submissions.push(handler.on_submit(event.clone()).await);
        }
        submissions
    }
}
