//! mediagrid core library
//!
//! This crate provides the domain model, the file-type classifier, backend
//! configuration, error types and the trait seams (backend, surface, notifier)
//! shared by every mediagrid component.

pub mod classifier;
pub mod config;
pub mod error;
pub mod hooks;
pub mod models;

// Re-export commonly used types
pub use classifier::{classify, content_type_for, extension_of};
pub use config::{BackendProfile, GalleryConfig, UploadMode};
pub use error::{BackendError, ConfigError};
pub use hooks::{MediaBackend, Notifier, Surface};
pub use models::{
    GalleryElement, GalleryState, MediaFile, MediaKind, Notice, Placeholder, SelectedFile,
    UploadResult,
};
