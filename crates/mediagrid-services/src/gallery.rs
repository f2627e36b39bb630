//! Remote gallery loading.

use std::sync::Arc;

use mediagrid_core::{
    GalleryConfig, GalleryElement, GalleryState, MediaBackend, Placeholder, Surface,
};

/// Fetches the backend listing and renders it as a media grid.
#[derive(Clone)]
pub struct GalleryLoader {
    config: GalleryConfig,
    backend: Arc<dyn MediaBackend>,
    surface: Arc<dyn Surface>,
}

impl GalleryLoader {
    pub fn new(
        config: GalleryConfig,
        backend: Arc<dyn MediaBackend>,
        surface: Arc<dyn Surface>,
    ) -> Self {
        Self {
            config,
            backend,
            surface,
        }
    }

    pub fn config(&self) -> &GalleryConfig {
        &self.config
    }

    /// Fetch the listing and replace the surface content with it.
    ///
    /// Never fails: a listing error renders a single error placeholder and
    /// yields an empty state.
    pub async fn load(&self) -> GalleryState {
        match self.backend.list_files().await {
            Ok(names) => {
                let state = GalleryState::from_listing(&names);
                let elements = self.elements_for(&names, &state);
                tracing::info!(
                    listed = names.len(),
                    shown = state.len(),
                    "Gallery loaded"
                );
                self.surface.replace(elements);
                state
            }
            Err(e) => {
                tracing::error!(error = %e, url = %self.config.list_url(), "Failed to load gallery");
                self.surface
                    .replace(vec![GalleryElement::Placeholder(Placeholder::unreachable())]);
                GalleryState::default()
            }
        }
    }

    /// An empty listing gets the "no media yet" placeholder. A listing with only
    /// unsupported files renders an empty grid.
    fn elements_for(&self, names: &[String], state: &GalleryState) -> Vec<GalleryElement> {
        if names.is_empty() {
            return vec![GalleryElement::Placeholder(Placeholder::Empty)];
        }

        state
            .files
            .iter()
            .map(|file| GalleryElement::Media {
                kind: file.kind,
                src: self.config.serve_url(&file.name),
                caption: file.name.clone(),
            })
            .collect()
    }
}
