//! Error types module
//!
//! `BackendError` is what a [`MediaBackend`](crate::hooks::MediaBackend) call can
//! fail with; the gallery components turn each variant into a notice or a
//! placeholder. `ConfigError` covers invalid backend configuration.

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The request never completed (DNS, refused connection, reset, timeout).
    #[error("Connection failed: {0}")]
    Connectivity(String),

    /// The backend answered with a non-success status.
    #[error("Request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    /// The backend answered with a success status but an unexpected body.
    #[error("Unexpected response body: {0}")]
    Decode(String),
}

impl BackendError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, BackendError::Connectivity(_))
    }
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(format!("JSON parsing error: {}", err))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing configuration value: {0}")]
    Missing(&'static str),

    #[error("Invalid {key} '{value}': expected {expected}")]
    InvalidValue {
        key: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("Failed to build HTTP client: {0}")]
    Client(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_mentions_body() {
        let err = BackendError::Status {
            status: 500,
            body: "disk full".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed with status 500: disk full");
        assert!(!err.is_connectivity());
    }

    #[test]
    fn json_errors_become_decode_errors() {
        let err: BackendError = serde_json::from_str::<Vec<String>>("{}")
            .unwrap_err()
            .into();
        assert!(matches!(err, BackendError::Decode(_)));
    }
}
