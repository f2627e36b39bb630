//! Shared fakes for service tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use mediagrid_core::{BackendError, GalleryConfig, MediaBackend, SelectedFile, UploadResult};

use crate::{GalleryLoader, MemoryNotifier, MemorySurface, PreviewRenderer, UploadSubmitter};

/// Canned answer for one backend call.
#[derive(Clone, Debug)]
pub enum Reply<T> {
    Ok(T),
    Status(u16, String),
    Garbage,
    Unreachable,
}

impl<T: Clone> Reply<T> {
    fn resolve(&self) -> Result<T, BackendError> {
        match self {
            Reply::Ok(value) => Ok(value.clone()),
            Reply::Status(status, body) => Err(BackendError::Status {
                status: *status,
                body: body.clone(),
            }),
            Reply::Garbage => Err(BackendError::Decode("expected value".to_string())),
            Reply::Unreachable => Err(BackendError::Connectivity(
                "connection refused".to_string(),
            )),
        }
    }
}

/// Backend returning canned replies and counting calls.
pub struct FakeBackend {
    listing: Mutex<Reply<Vec<String>>>,
    upload: Mutex<Reply<UploadResult>>,
    pub list_calls: AtomicUsize,
    pub upload_calls: AtomicUsize,
    pub uploaded_names: Mutex<Vec<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self {
            listing: Mutex::new(Reply::Ok(Vec::new())),
            upload: Mutex::new(Reply::Ok(UploadResult::default())),
            list_calls: AtomicUsize::new(0),
            upload_calls: AtomicUsize::new(0),
            uploaded_names: Mutex::new(Vec::new()),
        }
    }

    pub fn with_listing(self, names: &[&str]) -> Self {
        self.set_listing(Reply::Ok(names.iter().map(|n| n.to_string()).collect()));
        self
    }

    pub fn with_listing_reply(self, reply: Reply<Vec<String>>) -> Self {
        self.set_listing(reply);
        self
    }

    pub fn with_upload_reply(self, reply: Reply<UploadResult>) -> Self {
        *self.upload.lock().unwrap() = reply;
        self
    }

    pub fn set_listing(&self, reply: Reply<Vec<String>>) {
        *self.listing.lock().unwrap() = reply;
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn upload_calls(&self) -> usize {
        self.upload_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaBackend for FakeBackend {
    async fn list_files(&self) -> Result<Vec<String>, BackendError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let reply = self.listing.lock().unwrap().clone();
        reply.resolve()
    }

    async fn upload(&self, files: &[SelectedFile]) -> Result<UploadResult, BackendError> {
        self.upload_calls.fetch_add(1, Ordering::SeqCst);
        self.uploaded_names
            .lock()
            .unwrap()
            .extend(files.iter().map(|f| f.name.clone()));
        let reply = self.upload.lock().unwrap().clone();
        reply.resolve()
    }
}

pub fn test_config() -> GalleryConfig {
    GalleryConfig {
        base_url: "http://gallery.test".to_string(),
        ..GalleryConfig::default()
    }
}

pub fn upload_result(uploaded: &[&str], failed: &[&str]) -> UploadResult {
    UploadResult {
        message: None,
        uploaded: uploaded.iter().map(|s| s.to_string()).collect(),
        failed: failed.iter().map(|s| s.to_string()).collect(),
    }
}

pub fn write_file(dir: &Path, name: &str, contents: &[u8]) -> SelectedFile {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    SelectedFile::from_path(path)
}

/// Everything an upload submitter needs, wired to in-memory fakes.
pub struct Harness {
    pub backend: Arc<FakeBackend>,
    pub surface: Arc<MemorySurface>,
    pub notifier: Arc<MemoryNotifier>,
    pub submitter: UploadSubmitter,
}

impl Harness {
    pub fn new(backend: FakeBackend) -> Self {
        let backend = Arc::new(backend);
        let surface = Arc::new(MemorySurface::new());
        let notifier = Arc::new(MemoryNotifier::new());

        let loader = GalleryLoader::new(test_config(), backend.clone(), surface.clone());
        let previews = PreviewRenderer::new(surface.clone(), notifier.clone());
        let submitter = UploadSubmitter::new(
            backend.clone(),
            surface.clone(),
            notifier.clone(),
            previews,
            loader,
        );

        Self {
            backend,
            surface,
            notifier,
            submitter,
        }
    }
}
