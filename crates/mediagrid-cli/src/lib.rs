use clap::Args;
use mediagrid_core::config;
use mediagrid_core::{
    BackendProfile, ConfigError, GalleryConfig, GalleryElement, Notice, Notifier, UploadMode,
};

/// Truncate a string to max_len characters, appending "..." if truncated.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Backend selection flags. Each flag overrides the matching `MEDIAGRID_*`
/// variable, which overrides the profile preset.
#[derive(Args, Debug, Default)]
pub struct BackendArgs {
    /// Backend preset: flask, express, aspnet or single
    #[arg(long, global = true)]
    pub profile: Option<BackendProfile>,
    /// Server base URL, e.g. http://192.168.0.14:5000
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    /// Listing endpoint path
    #[arg(long, global = true)]
    pub list_path: Option<String>,
    /// Upload endpoint path
    #[arg(long, global = true)]
    pub upload_path: Option<String>,
    /// Path prefix stored files are served under
    #[arg(long, global = true)]
    pub serve_path: Option<String>,
    /// Multipart field name for uploaded files
    #[arg(long, global = true)]
    pub upload_field: Option<String>,
    /// Upload strategy: batched or per-file
    #[arg(long, global = true)]
    pub upload_mode: Option<UploadMode>,
    /// Request timeout in seconds (no timeout when unset)
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,
}

impl BackendArgs {
    /// Resolve the configuration from the process environment.
    pub fn into_config(self) -> Result<GalleryConfig, ConfigError> {
        self.into_config_with(|key| std::env::var(key).ok())
    }

    /// Resolve the configuration against `var` as the environment. Variables a
    /// flag overrides are never read, so a stale value cannot fail the command.
    pub fn into_config_with<F>(self, var: F) -> Result<GalleryConfig, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let overridden = self.overridden_vars();
        let mut config = GalleryConfig::load_vars(self.profile, |key| {
            if overridden.iter().any(|k| *k == key) {
                None
            } else {
                var(key)
            }
        })?;

        if let Some(base_url) = self.base_url {
            config.base_url = base_url;
        }
        if let Some(list_path) = self.list_path {
            config.list_path = list_path;
        }
        if let Some(upload_path) = self.upload_path {
            config.upload_path = upload_path;
        }
        if let Some(serve_path) = self.serve_path {
            config.serve_path = serve_path;
        }
        if let Some(upload_field) = self.upload_field {
            config.upload_field = upload_field;
        }
        if let Some(upload_mode) = self.upload_mode {
            config.upload_mode = upload_mode;
        }
        if self.timeout_secs.is_some() {
            config.request_timeout_secs = self.timeout_secs;
        }

        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn overridden_vars(&self) -> Vec<&'static str> {
        [
            (self.profile.is_some(), config::ENV_PROFILE),
            (self.base_url.is_some(), config::ENV_BASE_URL),
            (self.list_path.is_some(), config::ENV_LIST_PATH),
            (self.upload_path.is_some(), config::ENV_UPLOAD_PATH),
            (self.serve_path.is_some(), config::ENV_SERVE_PATH),
            (self.upload_field.is_some(), config::ENV_UPLOAD_FIELD),
            (self.upload_mode.is_some(), config::ENV_UPLOAD_MODE),
            (self.timeout_secs.is_some(), config::ENV_TIMEOUT_SECS),
        ]
        .into_iter()
        .filter_map(|(set, key)| set.then_some(key))
        .collect()
    }
}

/// Prints notices to stderr as they arrive.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&self, notice: Notice) {
        let prefix = if notice.is_error() { "error" } else { "notice" };
        for line in notice.to_string().lines() {
            eprintln!("{}: {}", prefix, line);
        }
    }
}

/// One line per element.
pub fn format_element(element: &GalleryElement) -> String {
    match element {
        GalleryElement::Media { kind, src, caption } => {
            format!("{:<8} {:<40} {}", kind.to_string(), truncate_string(caption, 40), src)
        }
        GalleryElement::Preview { kind, src, caption } => format!(
            "{:<8} {:<40} {}",
            kind.to_string(),
            truncate_string(caption, 40),
            truncate_string(src, 48)
        ),
        GalleryElement::Placeholder(placeholder) => placeholder.text().to_string(),
    }
}

pub fn print_elements(elements: &[GalleryElement]) {
    for element in elements {
        println!("{}", format_element(element));
    }
}
