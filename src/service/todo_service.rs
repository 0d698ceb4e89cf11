//! List and task use cases.
//!
//! Every task operation loads the whole list aggregate, mutates it in memory
//! and saves it back. Saves are version-checked by the store, so a request
//! working from a stale aggregate fails with `TodoError::Conflict` instead
//! of overwriting a concurrent change.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::{TodoError, TodoResult};
use super::ordering::reorder_dropping_omitted;
use crate::db::utils::current_timestamp;
use crate::db::{Database, DbError, ListRepository, Task, TodoList};

/// Use-case service over an injected store.
pub struct TodoService<D: Database> {
    db: Arc<D>,
}

impl<D: Database> Clone for TodoService<D> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
        }
    }
}

impl<D: Database> TodoService<D> {
    pub fn new(db: Arc<D>) -> Self {
        Self { db }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    #[instrument(skip(self))]
    pub async fn list_lists(&self) -> TodoResult<Vec<TodoList>> {
        Ok(self.db.lists().list_all().await?)
    }

    /// Create an empty list. The name must be present and not blank.
    #[instrument(skip(self))]
    pub async fn create_list(&self, name: Option<String>) -> TodoResult<TodoList> {
        let name = name.ok_or_else(|| TodoError::validation("List name is required"))?;
        let list = self.db.lists().create(&TodoList::new(name)).await?;
        debug!(list_id = %list.id, "Created list");
        Ok(list)
    }

    #[instrument(skip(self))]
    pub async fn get_list(&self, list_id: &str) -> TodoResult<TodoList> {
        Ok(self.db.lists().get(list_id).await?)
    }

    /// Rename a list.
    ///
    /// Unlike `create_list` the name is not checked for emptiness. A missing
    /// name leaves the list unchanged.
    #[instrument(skip(self))]
    pub async fn rename_list(&self, list_id: &str, name: Option<String>) -> TodoResult<TodoList> {
        match name {
            Some(name) => Ok(self.db.lists().rename(list_id, &name).await?),
            None => self.get_list(list_id).await,
        }
    }

    /// Delete a list together with all of its tasks.
    #[instrument(skip(self))]
    pub async fn delete_list(&self, list_id: &str) -> TodoResult<()> {
        self.db.lists().delete(list_id).await?;
        debug!(list_id, "Deleted list");
        Ok(())
    }

    // =========================================================================
    // Tasks
    // =========================================================================

    /// Append a task (not completed, order 0) and return it with its new id.
    #[instrument(skip(self))]
    pub async fn add_task(&self, list_id: &str, text: Option<String>) -> TodoResult<Task> {
        let mut list = self.db.lists().get(list_id).await?;

        let text = text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| TodoError::validation("Task text is required"))?;

        let index = list.tasks.len();
        list.tasks.push(Task::new(list_id, text));
        let saved = self.db.lists().save(&list).await?;

        saved.tasks.into_iter().nth(index).ok_or_else(|| {
            TodoError::Store(DbError::Database {
                message: format!("Appended task missing from saved list '{}'", list_id),
            })
        })
    }

    /// Flip a task's completed flag.
    #[instrument(skip(self))]
    pub async fn toggle_task(&self, list_id: &str, task_id: &str) -> TodoResult<Task> {
        self.update_task(list_id, task_id, |task| {
            task.completed = !task.completed;
        })
        .await
    }

    /// Replace a task's text with the trimmed `text`.
    #[instrument(skip(self))]
    pub async fn rename_task(
        &self,
        list_id: &str,
        task_id: &str,
        text: Option<String>,
    ) -> TodoResult<Task> {
        let text = text
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| TodoError::validation("Task text cannot be empty"))?;

        self.update_task(list_id, task_id, move |task| {
            task.text = text;
        })
        .await
    }

    #[instrument(skip(self))]
    pub async fn delete_task(&self, list_id: &str, task_id: &str) -> TodoResult<()> {
        let mut list = self.db.lists().get(list_id).await?;

        list.remove_task(task_id)
            .ok_or_else(|| TodoError::task_not_found(task_id))?;

        self.db.lists().save(&list).await?;
        debug!(list_id, task_id, "Deleted task");
        Ok(())
    }

    /// Replace the list's task sequence with the tasks named in `task_ids`.
    ///
    /// See [`reorder_dropping_omitted`]: tasks left out of `task_ids` are
    /// removed from the list.
    #[instrument(skip(self))]
    pub async fn reorder_tasks(&self, list_id: &str, task_ids: &[String]) -> TodoResult<Vec<Task>> {
        let mut list = self.db.lists().get(list_id).await?;

        let before = list.tasks.len();
        list.tasks = reorder_dropping_omitted(
            std::mem::take(&mut list.tasks),
            task_ids,
            &current_timestamp(),
        );
        if list.tasks.len() < before {
            debug!(
                list_id,
                dropped = before - list.tasks.len(),
                "Reorder dropped omitted tasks"
            );
        }

        let saved = self.db.lists().save(&list).await?;
        Ok(saved.tasks)
    }

    /// Load the list, apply `change` to one task, save, and return that task.
    async fn update_task<F>(&self, list_id: &str, task_id: &str, change: F) -> TodoResult<Task>
    where
        F: FnOnce(&mut Task) + Send,
    {
        let mut list = self.db.lists().get(list_id).await?;

        let task = list
            .task_mut(task_id)
            .ok_or_else(|| TodoError::task_not_found(task_id))?;
        change(task);
        task.updated_at = current_timestamp();

        let saved = self.db.lists().save(&list).await?;
        saved
            .task(task_id)
            .cloned()
            .ok_or_else(|| TodoError::task_not_found(task_id))
    }
}
