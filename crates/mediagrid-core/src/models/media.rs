use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::classifier::{classify, content_type_for, extension_of};

/// How a file is displayed in the gallery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
    Unsupported,
}

impl MediaKind {
    pub fn is_displayable(&self) -> bool {
        !matches!(self, MediaKind::Unsupported)
    }

    /// Element kind for a declared content type: anything starting with `video` is
    /// a video, everything else is shown as an image.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.to_lowercase().starts_with("video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Image => write!(f, "image"),
            MediaKind::Video => write!(f, "video"),
            MediaKind::Unsupported => write!(f, "unsupported"),
        }
    }
}

/// A file named in a listing response. Identity is the server-relative name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaFile {
    pub name: String,
    pub extension: String,
    pub kind: MediaKind,
}

impl MediaFile {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            extension: extension_of(&name),
            kind: classify(&name),
            name,
        }
    }
}

/// The media entries currently rendered by a surface.
///
/// Always rebuilt from a full listing; never patched in place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryState {
    pub files: Vec<MediaFile>,
}

impl GalleryState {
    /// Keep the displayable entries of a listing, in listing order.
    pub fn from_listing<S: AsRef<str>>(names: &[S]) -> Self {
        let files = names
            .iter()
            .map(|name| MediaFile::new(name.as_ref()))
            .filter(|file| {
                if !file.kind.is_displayable() {
                    tracing::info!(
                        name = %file.name,
                        extension = %file.extension,
                        "Skipping file with unsupported extension"
                    );
                }
                file.kind.is_displayable()
            })
            .collect();

        Self { files }
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// A local file chosen for preview and upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
    pub content_type: String,
}

impl SelectedFile {
    /// Select a local file. The name is the last path component and the declared
    /// content type is derived from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());

        Self {
            content_type: content_type_for(&name).to_string(),
            path: path.to_path_buf(),
            name,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = content_type.into();
        self
    }
}
