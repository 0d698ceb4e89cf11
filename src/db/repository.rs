//! Repository traits for data access abstraction.
//!
//! These traits define the contract for data access, allowing different
//! storage backends to be swapped without changing the service layer.
//! Futures are `Send` so handlers generic over `Database` can run on axum.

use std::future::Future;

use crate::db::{DbResult, models::TodoList};

/// Repository for TodoList aggregates (a list together with its tasks).
pub trait ListRepository {
    /// Get every list with its tasks, unfiltered.
    fn list_all(&self) -> impl Future<Output = DbResult<Vec<TodoList>>> + Send;

    /// Create a new list. Fails with `Validation` if the name is blank.
    ///
    /// Empty id and timestamps are generated by the repository. Tasks on the
    /// input are ignored; a new list always starts empty.
    fn create(&self, list: &TodoList) -> impl Future<Output = DbResult<TodoList>> + Send;

    /// Get a list by ID.
    fn get(&self, id: &str) -> impl Future<Output = DbResult<TodoList>> + Send;

    /// Rename a list.
    fn rename(&self, id: &str, name: &str) -> impl Future<Output = DbResult<TodoList>> + Send;

    /// Delete a list and all of its tasks.
    fn delete(&self, id: &str) -> impl Future<Output = DbResult<()>> + Send;

    /// Persist the whole aggregate atomically, replacing the stored task sequence.
    ///
    /// Fails with `Conflict` when the stored version no longer matches
    /// `list.version`. Returns the aggregate as persisted, with generated task
    /// ids and timestamps filled in and the version bumped.
    fn save(&self, list: &TodoList) -> impl Future<Output = DbResult<TodoList>> + Send;
}

/// Combined database interface.
pub trait Database: Send + Sync {
    type Lists: ListRepository + Send + Sync;

    /// Run pending migrations.
    fn migrate(&self) -> impl Future<Output = DbResult<()>> + Send;

    /// Get the list repository.
    fn lists(&self) -> &Self::Lists;
}
