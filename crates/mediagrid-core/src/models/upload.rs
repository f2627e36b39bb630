use serde::{Deserialize, Serialize};

/// Per-file outcome of one upload submission.
///
/// Backends may omit any field; a missing list is empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default)]
    pub uploaded: Vec<String>,
    #[serde(default)]
    pub failed: Vec<String>,
}

impl UploadResult {
    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }

    /// Restrict the report to names that were actually selected.
    ///
    /// A reported name matches a selected name exactly, or is a selected name
    /// followed by a parenthesised diagnostic such as `"a.png (Error: disk full)"`.
    /// Unmatched names are dropped. A name reported as both uploaded and failed is
    /// kept as uploaded only, and repeats collapse to their first occurrence.
    pub fn reconcile<S: AsRef<str>>(self, selection: &[S]) -> Self {
        let mut uploaded: Vec<String> = Vec::new();
        for reported in &self.uploaded {
            match match_selected(reported, selection) {
                Some(name) => {
                    if !uploaded.iter().any(|n| n == name) {
                        uploaded.push(name.to_string());
                    }
                }
                None => tracing::warn!(
                    reported = %reported,
                    "Backend reported an uploaded file that was not selected"
                ),
            }
        }

        let mut failed: Vec<String> = Vec::new();
        for reported in &self.failed {
            match match_selected(reported, selection) {
                Some(name) => {
                    if reported != name {
                        tracing::warn!(file = %name, detail = %reported, "Upload failed");
                    }
                    if uploaded.iter().any(|n| n == name) {
                        tracing::warn!(
                            file = %name,
                            "Backend reported a file as both uploaded and failed"
                        );
                    } else if !failed.iter().any(|n| n == name) {
                        failed.push(name.to_string());
                    }
                }
                None => tracing::warn!(
                    reported = %reported,
                    "Backend reported a failed file that was not selected"
                ),
            }
        }

        Self {
            message: self.message,
            uploaded,
            failed,
        }
    }
}

fn match_selected<'a, S: AsRef<str>>(reported: &str, selection: &'a [S]) -> Option<&'a str> {
    if let Some(exact) = selection.iter().find(|s| s.as_ref() == reported) {
        return Some(exact.as_ref());
    }

    selection
        .iter()
        .map(|s| s.as_ref())
        .filter(|name| {
            !name.is_empty()
                && reported
                    .strip_prefix(name)
                    .is_some_and(|rest| rest.trim_start().starts_with('('))
        })
        .max_by_key(|name| name.len())
}
