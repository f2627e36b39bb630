//! HTTP client for media upload backends.
//!
//! Provides a minimal client over a [`GalleryConfig`], generic GET and multipart
//! POST helpers, and the domain methods (list, batched upload, per-file upload)
//! in [`api`]. The client implements [`mediagrid_core::MediaBackend`].

pub mod api;

use mediagrid_core::{BackendError, ConfigError, GalleryConfig};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// HTTP client bound to one backend configuration.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    config: GalleryConfig,
}

impl ApiClient {
    pub fn new(mut config: GalleryConfig) -> Result<Self, ConfigError> {
        config.normalize();
        config.validate()?;

        let mut builder = Client::builder();
        if let Some(secs) = config.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::Client(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Create client from `MEDIAGRID_*` environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::new(GalleryConfig::from_env()?)
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Send a request and keep only success responses.
    ///
    /// A request that never completes is a connectivity error; a non-success
    /// status carries the response body as text.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Connectivity(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, BackendError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|e| BackendError::Connectivity(e.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// GET request. Deserializes JSON response.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, BackendError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "GET");

        let response = self.send(self.client.get(&url)).await?;
        Self::decode(response).await
    }

    /// POST multipart form and deserialize response.
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, BackendError> {
        let response = self.post_multipart_raw(path, form).await?;
        Self::decode(response).await
    }

    /// POST multipart form and return the success response undecoded.
    pub async fn post_multipart_raw(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<reqwest::Response, BackendError> {
        let url = self.build_url(path);
        tracing::debug!(url = %url, "POST multipart");

        self.send(self.client.post(&url).multipart(form)).await
    }
}
