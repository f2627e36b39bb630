//! Configuration module
//!
//! Backend addressing for the gallery components. Every base URL and endpoint
//! path is configuration; the known backend variants are available as
//! [`BackendProfile`] presets that individual settings can override.

use std::env;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const ENV_PROFILE: &str = "MEDIAGRID_PROFILE";
pub const ENV_BASE_URL: &str = "MEDIAGRID_BASE_URL";
pub const ENV_LIST_PATH: &str = "MEDIAGRID_LIST_PATH";
pub const ENV_UPLOAD_PATH: &str = "MEDIAGRID_UPLOAD_PATH";
pub const ENV_SERVE_PATH: &str = "MEDIAGRID_SERVE_PATH";
pub const ENV_UPLOAD_FIELD: &str = "MEDIAGRID_UPLOAD_FIELD";
pub const ENV_UPLOAD_MODE: &str = "MEDIAGRID_UPLOAD_MODE";
pub const ENV_TIMEOUT_SECS: &str = "MEDIAGRID_TIMEOUT_SECS";

const DEFAULT_UPLOAD_FIELD: &str = "files";
const SINGLE_UPLOAD_FIELD: &str = "file";

/// How a selection is sent to the upload endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UploadMode {
    /// One multipart request carrying every selected file under one field.
    #[default]
    Batched,
    /// One request per file against a single-file endpoint.
    PerFile,
}

impl FromStr for UploadMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "batched" | "batch" | "multipart" => Ok(UploadMode::Batched),
            "per-file" | "per_file" | "perfile" | "single" => Ok(UploadMode::PerFile),
            other => Err(ConfigError::InvalidValue {
                key: "upload_mode",
                value: other.to_string(),
                expected: "batched or per-file",
            }),
        }
    }
}

impl std::fmt::Display for UploadMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadMode::Batched => write!(f, "batched"),
            UploadMode::PerFile => write!(f, "per-file"),
        }
    }
}

/// Presets for the backend variants the gallery is known to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendProfile {
    /// Flask server: `/uploadMultiple`, files under `/Upload/files`.
    #[default]
    Flask,
    /// Express server: `/upload-files`, files under `/uploads`.
    Express,
    /// ASP.NET controller: everything under `/Upload`.
    Aspnet,
    /// Single-file endpoint, one request per file.
    Single,
}

impl BackendProfile {
    pub fn config(&self) -> GalleryConfig {
        let (base_url, list_path, upload_path, serve_path, upload_field, upload_mode) = match self
        {
            BackendProfile::Flask => (
                "http://localhost:5000",
                "/Upload/list",
                "/uploadMultiple",
                "/Upload/files",
                DEFAULT_UPLOAD_FIELD,
                UploadMode::Batched,
            ),
            BackendProfile::Express => (
                "http://localhost:3000",
                "/list-files",
                "/upload-files",
                "/uploads",
                DEFAULT_UPLOAD_FIELD,
                UploadMode::Batched,
            ),
            BackendProfile::Aspnet => (
                "http://localhost:5000",
                "/Upload/list",
                "/Upload/upload",
                "/Upload/files",
                DEFAULT_UPLOAD_FIELD,
                UploadMode::Batched,
            ),
            BackendProfile::Single => (
                "http://localhost:3000",
                "/list-files",
                "/upload",
                "/uploads",
                SINGLE_UPLOAD_FIELD,
                UploadMode::PerFile,
            ),
        };

        GalleryConfig {
            base_url: base_url.to_string(),
            list_path: list_path.to_string(),
            upload_path: upload_path.to_string(),
            serve_path: serve_path.to_string(),
            upload_field: upload_field.to_string(),
            upload_mode,
            request_timeout_secs: None,
        }
    }
}

impl FromStr for BackendProfile {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flask" | "python" => Ok(BackendProfile::Flask),
            "express" | "node" => Ok(BackendProfile::Express),
            "aspnet" | "asp.net" | "dotnet" => Ok(BackendProfile::Aspnet),
            "single" | "single-file" => Ok(BackendProfile::Single),
            other => Err(ConfigError::InvalidValue {
                key: "profile",
                value: other.to_string(),
                expected: "flask, express, aspnet or single",
            }),
        }
    }
}

/// Where the backend lives and how to talk to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryConfig {
    pub base_url: String,
    pub list_path: String,
    pub upload_path: String,
    pub serve_path: String,
    /// Multipart field name every file part is sent under.
    pub upload_field: String,
    pub upload_mode: UploadMode,
    /// No timeout when unset: a hung request waits indefinitely.
    pub request_timeout_secs: Option<u64>,
}

impl Default for GalleryConfig {
    fn default() -> Self {
        BackendProfile::default().config()
    }
}

impl GalleryConfig {
    /// Start from `MEDIAGRID_PROFILE` (default `flask`) and apply any
    /// `MEDIAGRID_*` overrides from the process environment. Binaries load
    /// `.env` into it at startup.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_with_profile(None)
    }

    /// Like [`GalleryConfig::from_env`], but an explicit profile takes precedence
    /// over `MEDIAGRID_PROFILE`.
    pub fn from_env_with_profile(profile: Option<BackendProfile>) -> Result<Self, ConfigError> {
        let mut config = Self::load_vars(profile, |key| env::var(key).ok())?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Profile preset plus the `MEDIAGRID_*` overrides returned by `var`.
    ///
    /// The result is neither normalized nor validated, so callers can layer more
    /// overrides on top before checking it once.
    pub fn load_vars<F>(profile: Option<BackendProfile>, var: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let profile = match (profile, var(ENV_PROFILE)) {
            (Some(profile), _) => profile,
            (None, Some(value)) => value.parse::<BackendProfile>()?,
            (None, None) => BackendProfile::default(),
        };
        let mut config = profile.config();

        if let Some(base_url) = var(ENV_BASE_URL) {
            config.base_url = base_url;
        }
        if let Some(list_path) = var(ENV_LIST_PATH) {
            config.list_path = list_path;
        }
        if let Some(upload_path) = var(ENV_UPLOAD_PATH) {
            config.upload_path = upload_path;
        }
        if let Some(serve_path) = var(ENV_SERVE_PATH) {
            config.serve_path = serve_path;
        }
        if let Some(upload_field) = var(ENV_UPLOAD_FIELD) {
            config.upload_field = upload_field;
        }
        if let Some(mode) = var(ENV_UPLOAD_MODE) {
            config.upload_mode = mode.parse()?;
        }
        if let Some(timeout) = var(ENV_TIMEOUT_SECS) {
            let secs = timeout
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    key: ENV_TIMEOUT_SECS,
                    value: timeout.clone(),
                    expected: "a whole number of seconds",
                })?;
            config.request_timeout_secs = Some(secs);
        }

        Ok(config)
    }

    /// Trim the trailing slash of the base URL and of the serve path.
    pub fn normalize(&mut self) {
        self.base_url = self.base_url.trim().trim_end_matches('/').to_string();
        self.serve_path = self.serve_path.trim().trim_end_matches('/').to_string();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ConfigError::InvalidValue {
                key: "base_url",
                value: self.base_url.clone(),
                expected: "an http:// or https:// URL",
            });
        }

        for (key, path) in [
            ("list_path", &self.list_path),
            ("upload_path", &self.upload_path),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    key,
                    value: path.clone(),
                    expected: "a path starting with '/'",
                });
            }
        }

        if !self.serve_path.is_empty() && !self.serve_path.starts_with('/') {
            return Err(ConfigError::InvalidValue {
                key: "serve_path",
                value: self.serve_path.clone(),
                expected: "a path starting with '/'",
            });
        }

        if self.upload_field.trim().is_empty() {
            return Err(ConfigError::Missing("upload_field"));
        }

        if self.request_timeout_secs == Some(0) {
            return Err(ConfigError::InvalidValue {
                key: "request_timeout_secs",
                value: "0".to_string(),
                expected: "a positive number of seconds",
            });
        }

        Ok(())
    }

    pub fn list_url(&self) -> String {
        format!("{}{}", self.base_url, self.list_path)
    }

    pub fn upload_url(&self) -> String {
        format!("{}{}", self.base_url, self.upload_path)
    }

    /// URL a stored file is served from. The name is percent-encoded.
    pub fn serve_url(&self, name: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            self.serve_path,
            urlencoding::encode(name)
        )
    }
}
