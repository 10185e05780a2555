//! Application state - shared across all handlers.

use std::sync::Arc;

use pageturner_core::ports::LibraryRepository;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn LibraryRepository>,
}

impl AppState {
    pub fn new(repo: Arc<dyn LibraryRepository>) -> Self {
        Self { repo }
    }
}
