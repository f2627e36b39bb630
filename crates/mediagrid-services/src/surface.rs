//! In-memory surface and notifier.

use std::sync::{Mutex, PoisonError};

use mediagrid_core::{GalleryElement, Notice, Notifier, Surface};

/// Surface that keeps its elements in memory, in display order.
#[derive(Debug, Default)]
pub struct MemorySurface {
    elements: Mutex<Vec<GalleryElement>>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn media_count(&self) -> usize {
        self.count(GalleryElement::is_media)
    }

    pub fn preview_count(&self) -> usize {
        self.count(GalleryElement::is_preview)
    }

    pub fn placeholder_count(&self) -> usize {
        self.count(GalleryElement::is_placeholder)
    }

    fn count(&self, predicate: fn(&GalleryElement) -> bool) -> usize {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| predicate(e))
            .count()
    }
}

impl Surface for MemorySurface {
    fn clear(&self) {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn append(&self, element: GalleryElement) {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(element);
    }

    fn replace(&self, elements: Vec<GalleryElement>) {
        *self.elements.lock().unwrap_or_else(PoisonError::into_inner) = elements;
    }

    fn elements(&self) -> Vec<GalleryElement> {
        self.elements
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Notifier that records every notice, oldest first.
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Remove and return the recorded notices.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.notices.lock().unwrap_or_else(PoisonError::into_inner))
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notice: Notice) {
        tracing::debug!(notice = ?notice, "Notice");
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}
