//! Application state for the API server.

use std::sync::Arc;

use crate::db::Database;
use crate::service::TodoService;

/// Shared application state.
///
/// Generic over `D: Database`; the store is injected via the constructor and
/// owned by the service behind an `Arc`.
pub struct AppState<D: Database> {
    service: TodoService<D>,
}

// Manual Clone impl - only the Arc is cloned, D itself need not be Clone
impl<D: Database> Clone for AppState<D> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
        }
    }
}

impl<D: Database> AppState<D> {
    /// Create a new AppState around the given database.
    pub fn new(db: D) -> Self {
        Self {
            service: TodoService::new(Arc::new(db)),
        }
    }

    /// Get the list and task service.
    pub fn service(&self) -> &TodoService<D> {
        &self.service
    }
}
