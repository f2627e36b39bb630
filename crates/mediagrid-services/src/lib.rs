//! Gallery services
//!
//! The three gallery components (local preview, remote gallery loading, upload
//! submission), the form-submission abstraction that drives them, and
//! surfaces to render into.

pub mod form;
pub mod gallery;
pub mod html;
pub mod preview;
pub mod surface;
pub mod upload;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use form::{SubmitEvent, SubmitHandler, UploadForm};
pub use gallery::GalleryLoader;
pub use preview::{PreviewHandle, PreviewRenderer};
pub use surface::{MemoryNotifier, MemorySurface};
pub use upload::{Submission, SubmissionOutcome, UploadSubmitter};
