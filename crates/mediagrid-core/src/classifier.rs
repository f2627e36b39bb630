//! File type classification
//!
//! Maps a filename's extension to the kind of media element used to display it.
//! Classification never fails: anything outside the image and video tables is
//! `MediaKind::Unsupported`.

use crate::models::MediaKind;

/// Extensions rendered with an image element.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Extensions rendered with a video element.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi"];

/// Content type used when a local file's extension is not recognised.
pub const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Lowercased substring after the last `.`, or an empty string when the name has none.
pub fn extension_of(filename: &str) -> String {
    match filename.rfind('.') {
        Some(dot_index) => filename[dot_index + 1..].to_lowercase(),
        None => String::new(),
    }
}

/// Classify a filename by its extension.
pub fn classify(filename: &str) -> MediaKind {
    let extension = extension_of(filename);

    if IMAGE_EXTENSIONS.contains(&extension.as_str()) {
        MediaKind::Image
    } else if VIDEO_EXTENSIONS.contains(&extension.as_str()) {
        MediaKind::Video
    } else {
        MediaKind::Unsupported
    }
}

/// Declared content type for a local file, derived from its extension.
pub fn content_type_for(filename: &str) -> &'static str {
    match extension_of(filename).as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        // Videos
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        "avi" => "video/x-msvideo",
        "webm" => "video/webm",
        "mkv" => "video/x-matroska",
        "m4v" => "video/x-m4v",
        // Anything else
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => FALLBACK_CONTENT_TYPE,
    }
}
