use serde::{Deserialize, Serialize};

use super::{MediaKind, UploadResult};

const EMPTY_GALLERY_TEXT: &str = "No photos or videos uploaded yet.";
const GALLERY_UNREACHABLE_TEXT: &str =
    "Could not reach the server to load the gallery. Check that the server is running and the base URL is correct.";
const CONNECTIVITY_TEXT: &str =
    "Could not connect to the server. Check that the server is running and the base URL is correct.";

/// One item on a display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "element", rename_all = "snake_case")]
pub enum GalleryElement {
    /// Media served by the backend.
    Media {
        kind: MediaKind,
        src: String,
        caption: String,
    },
    /// Local preview of a selected file, `src` is a data URI.
    Preview {
        kind: MediaKind,
        src: String,
        caption: String,
    },
    Placeholder(Placeholder),
}

impl GalleryElement {
    pub fn is_media(&self) -> bool {
        matches!(self, GalleryElement::Media { .. })
    }

    pub fn is_preview(&self) -> bool {
        matches!(self, GalleryElement::Preview { .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, GalleryElement::Placeholder(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "placeholder", content = "text", rename_all = "snake_case")]
pub enum Placeholder {
    /// The listing was empty.
    Empty,
    /// The listing could not be fetched.
    Error(String),
}

impl Placeholder {
    pub fn unreachable() -> Self {
        Placeholder::Error(GALLERY_UNREACHABLE_TEXT.to_string())
    }

    pub fn text(&self) -> &str {
        match self {
            Placeholder::Empty => EMPTY_GALLERY_TEXT,
            Placeholder::Error(text) => text,
        }
    }
}

/// A user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "notice", rename_all = "snake_case")]
pub enum Notice {
    /// Submission attempted with no files.
    EmptySelection,
    /// The backend accepted the submission and reported per-file results.
    UploadReport(UploadResult),
    /// The backend answered with a non-success status.
    UploadRejected { status: u16, body: String },
    /// The request never completed.
    Connectivity,
}

impl Notice {
    pub fn is_error(&self) -> bool {
        match self {
            Notice::UploadReport(result) => result.has_failures(),
            _ => true,
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::EmptySelection => write!(f, "Select at least one file"),
            Notice::UploadReport(result) => {
                let mut lines = Vec::new();
                if !result.uploaded.is_empty() {
                    lines.push(format!("Uploaded: {}", result.uploaded.join(", ")));
                }
                if !result.failed.is_empty() {
                    lines.push(format!(
                        "These files could not be uploaded: {}",
                        result.failed.join(", ")
                    ));
                }
                if lines.is_empty() {
                    lines.push(
                        result
                            .message
                            .clone()
                            .unwrap_or_else(|| "Upload finished".to_string()),
                    );
                }
                write!(f, "{}", lines.join("\n"))
            }
            Notice::UploadRejected { body, .. } => write!(f, "Error uploading files: {}", body),
            Notice::Connectivity => write!(f, "{}", CONNECTIVITY_TEXT),
        }
    }
}
