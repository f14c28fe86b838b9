//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use crate::server::AssetStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Assets with their maintenance records and history.
    pub store: Arc<AssetStore>,
}

impl AppState {
    /// Creates state over an existing store.
    #[must_use]
    pub const fn new(store: Arc<AssetStore>) -> Self {
        Self { store }
    }
}
