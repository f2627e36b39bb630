//! Domain models

pub mod element;
pub mod media;
pub mod upload;

pub use element::{GalleryElement, Notice, Placeholder};
pub use media::{GalleryState, MediaFile, MediaKind, SelectedFile};
pub use upload::UploadResult;
