//! Domain methods for the backend client.
//!
//! Listing, the two upload strategies, and the [`MediaBackend`] implementation
//! that picks a strategy from [`UploadMode`].

use async_trait::async_trait;
use mediagrid_core::{BackendError, MediaBackend, SelectedFile, UploadMode, UploadResult};
use reqwest::multipart::{Form, Part};

use crate::ApiClient;

/// Bytes of one selected file, ready to become a multipart part.
struct LoadedFile {
    name: String,
    content_type: String,
    bytes: Vec<u8>,
}

impl LoadedFile {
    fn into_part(self) -> reqwest::Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.name)
            .mime_str(&self.content_type)
    }
}

/// Build the parts for every loaded file. A file whose declared content type is
/// not a valid MIME type is returned by name instead.
fn build_parts(loaded: Vec<LoadedFile>) -> (Vec<(String, Part)>, Vec<String>) {
    let mut parts = Vec::with_capacity(loaded.len());
    let mut rejected = Vec::new();

    for file in loaded {
        let name = file.name.clone();
        let content_type = file.content_type.clone();
        match file.into_part() {
            Ok(part) => parts.push((name, part)),
            Err(e) => {
                tracing::warn!(
                    file = %name,
                    content_type = %content_type,
                    error = %e,
                    "Invalid content type, counting file as failed"
                );
                rejected.push(name);
            }
        }
    }

    (parts, rejected)
}

/// Read every selected file. Files that cannot be read are returned by name.
async fn load_selection(files: &[SelectedFile]) -> (Vec<LoadedFile>, Vec<String>) {
    let mut loaded = Vec::with_capacity(files.len());
    let mut unreadable = Vec::new();

    for file in files {
        match tokio::fs::read(&file.path).await {
            Ok(bytes) => loaded.push(LoadedFile {
                name: file.name.clone(),
                content_type: file.content_type.clone(),
                bytes,
            }),
            Err(e) => {
                tracing::warn!(
                    file = %file.name,
                    path = %file.path.display(),
                    error = %e,
                    "Failed to read file, counting it as failed"
                );
                unreadable.push(file.name.clone());
            }
        }
    }

    (loaded, unreadable)
}

impl ApiClient {
    /// Names of the files stored on the backend.
    pub async fn list_files(&self) -> Result<Vec<String>, BackendError> {
        self.get(&self.config().list_path).await
    }

    /// Upload the selection in one multipart request, every file under the
    /// configured field name.
    pub async fn upload_batched(&self, files: &[SelectedFile]) -> Result<UploadResult, BackendError> {
        let (loaded, mut unsent) = load_selection(files).await;
        let (parts, rejected) = build_parts(loaded);
        unsent.extend(rejected);

        if parts.is_empty() {
            return Ok(UploadResult {
                message: Some("No selected file could be sent".to_string()),
                uploaded: Vec::new(),
                failed: unsent,
            });
        }

        let field = &self.config().upload_field;
        let form = parts
            .into_iter()
            .fold(Form::new(), |form, (_, part)| form.part(field.clone(), part));

        let mut result: UploadResult = self
            .post_multipart(&self.config().upload_path, form)
            .await?;
        result.failed.extend(unsent);

        Ok(result)
    }

    /// Upload each file in its own request against a single-file endpoint.
    ///
    /// A non-success status marks that file as failed and moves on; a request
    /// that never completes aborts the whole submission.
    pub async fn upload_per_file(
        &self,
        files: &[SelectedFile],
    ) -> Result<UploadResult, BackendError> {
        let (loaded, mut failed) = load_selection(files).await;
        let (parts, rejected) = build_parts(loaded);
        failed.extend(rejected);
        let total = files.len();

        let mut uploaded = Vec::new();

        for (name, part) in parts {
            let form = Form::new().part(self.config().upload_field.clone(), part);

            match self.post_multipart_raw(&self.config().upload_path, form).await {
                Ok(_) => {
                    tracing::debug!(file = %name, "Uploaded");
                    uploaded.push(name);
                }
                Err(BackendError::Status { status, body }) => {
                    tracing::warn!(file = %name, status, body = %body, "Upload rejected");
                    failed.push(name);
                }
                Err(e) => return Err(e),
            }
        }

        Ok(UploadResult {
            message: Some(format!("{} of {} files uploaded", uploaded.len(), total)),
            uploaded,
            failed,
        })
    }
}

#[async_trait]
impl MediaBackend for ApiClient {
    async fn list_files(&self) -> Result<Vec<String>, BackendError> {
        ApiClient::list_files(self).await
    }

    async fn upload(&self, files: &[SelectedFile]) -> Result<UploadResult, BackendError> {
        match self.config().upload_mode {
            UploadMode::Batched => self.upload_batched(files).await,
            UploadMode::PerFile => self.upload_per_file(files).await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mediagrid_core::{BackendProfile, GalleryConfig};
    use mockito::Matcher;
    use std::path::Path;

    fn client_for(url: &str, profile: BackendProfile) -> ApiClient {
        let config = GalleryConfig {
            base_url: url.to_string(),
            ..profile.config()
        };
        ApiClient::new(config).unwrap()
    }

    fn write_file(dir: &Path, name: &str, contents: &str) -> SelectedFile {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        SelectedFile::from_path(path)
    }

    #[tokio::test]
    async fn list_files_parses_names() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/Upload/list")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"["a.jpg","b.mp4","c.txt"]"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        let names = client.list_files().await.unwrap();

        assert_eq!(names, vec!["a.jpg", "b.mp4", "c.txt"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_files_uses_configured_path() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/list-files")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Express);
        assert!(client.list_files().await.unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn list_files_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/Upload/list")
            .with_status(500)
            .with_body(r#"{"message":"Error listing files"}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        match client.list_files().await {
            Err(BackendError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert!(body.contains("Error listing files"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn list_files_rejects_non_array() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/Upload/list")
            .with_status(200)
            .with_body(r#"{"files":[]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        assert!(matches!(
            client.list_files().await,
            Err(BackendError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn unreachable_server_is_connectivity_error() {
        let client = client_for("http://127.0.0.1:1", BackendProfile::Flask);
        let err = client.list_files().await.unwrap_err();
        assert!(err.is_connectivity(), "{err:?}");
    }

    #[tokio::test]
    async fn batched_upload_sends_every_file_under_one_field() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(dir.path(), "a.jpg", "first"),
            write_file(dir.path(), "b.mp4", "second"),
        ];

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/uploadMultiple")
            .match_header(
                "content-type",
                Matcher::Regex("^multipart/form-data".to_string()),
            )
            .match_body(Matcher::AllOf(vec![
                Matcher::Regex(r#"name="files"; filename="a.jpg""#.to_string()),
                Matcher::Regex(r#"name="files"; filename="b.mp4""#.to_string()),
                Matcher::Regex("first".to_string()),
                Matcher::Regex("second".to_string()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"message":"ok","uploaded":["a.jpg","b.mp4"]}"#)
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        let result = MediaBackend::upload(&client, &files).await.unwrap();

        assert_eq!(result.uploaded, vec!["a.jpg", "b.mp4"]);
        assert!(result.failed.is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn batched_upload_partial_content_is_success() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(dir.path(), "x.png", "x"),
            write_file(dir.path(), "y.png", "y"),
        ];

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/uploadMultiple")
            .with_status(206)
            .with_body(r#"{"message":"partial","uploaded":["x.png"],"failed":["y.png (Error: disk full)"]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        let result = client.upload_batched(&files).await.unwrap();

        assert_eq!(result.uploaded, vec!["x.png"]);
        assert_eq!(result.failed, vec!["y.png (Error: disk full)"]);
    }

    #[tokio::test]
    async fn batched_upload_error_keeps_body_text() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_file(dir.path(), "x.png", "x")];

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/uploadMultiple")
            .with_status(500)
            .with_body("disk full")
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        match client.upload_batched(&files).await {
            Err(BackendError::Status { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "disk full");
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn batched_upload_counts_unreadable_files_as_failed() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(dir.path(), "ok.jpg", "ok"),
            SelectedFile::from_path(dir.path().join("missing.jpg")),
        ];

        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/uploadMultiple")
            .with_status(200)
            .with_body(r#"{"uploaded":["ok.jpg"]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        let result = client.upload_batched(&files).await.unwrap();

        assert_eq!(result.uploaded, vec!["ok.jpg"]);
        assert_eq!(result.failed, vec!["missing.jpg"]);
    }

    #[tokio::test]
    async fn batched_upload_leaves_out_invalid_content_types() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(dir.path(), "ok.jpg", "ok"),
            write_file(dir.path(), "odd.jpg", "odd").with_content_type("not a mime type"),
        ];

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/uploadMultiple")
            .match_body(Matcher::Regex(r#"filename="ok\.jpg""#.to_string()))
            .with_status(200)
            .with_body(r#"{"uploaded":["ok.jpg"]}"#)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        let result = client.upload_batched(&files).await.unwrap();

        assert_eq!(result.uploaded, vec!["ok.jpg"]);
        assert_eq!(result.failed, vec!["odd.jpg"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn batched_upload_skips_request_when_nothing_readable() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![SelectedFile::from_path(dir.path().join("missing.jpg"))];

        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/uploadMultiple")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Flask);
        let result = client.upload_batched(&files).await.unwrap();

        assert!(result.uploaded.is_empty());
        assert_eq!(result.failed, vec!["missing.jpg"]);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn per_file_upload_aggregates_results() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![
            write_file(dir.path(), "good.jpg", "good"),
            write_file(dir.path(), "bad.jpg", "bad"),
        ];

        let mut server = mockito::Server::new_async().await;
        let good = server
            .mock("POST", "/upload")
            .match_body(Matcher::Regex(r#"name="file"; filename="good.jpg""#.to_string()))
            .with_status(200)
            .with_body(r#"{"message":"stored"}"#)
            .expect(1)
            .create_async()
            .await;
        let bad = server
            .mock("POST", "/upload")
            .match_body(Matcher::Regex(r#"name="file"; filename="bad.jpg""#.to_string()))
            .with_status(415)
            .with_body("unsupported media")
            .expect(1)
            .create_async()
            .await;

        let client = client_for(&server.url(), BackendProfile::Single);
        let result = MediaBackend::upload(&client, &files).await.unwrap();

        assert_eq!(result.uploaded, vec!["good.jpg"]);
        assert_eq!(result.failed, vec!["bad.jpg"]);
        assert_eq!(result.message.as_deref(), Some("1 of 2 files uploaded"));
        good.assert_async().await;
        bad.assert_async().await;
    }

    #[tokio::test]
    async fn per_file_upload_aborts_on_connectivity_failure() {
        let dir = tempfile::tempdir().unwrap();
        let files = vec![write_file(dir.path(), "a.jpg", "a")];

        let client = client_for("http://127.0.0.1:1", BackendProfile::Single);
        let err = client.upload_per_file(&files).await.unwrap_err();
        assert!(err.is_connectivity());
    }

    #[test]
    fn serve_url_uses_normalized_base() {
        let client = client_for("http://192.168.0.14:5000/", BackendProfile::Flask);
        assert_eq!(
            client.config().serve_url("a.jpg"),
            "http://192.168.0.14:5000/Upload/files/a.jpg"
        );
    }
}
