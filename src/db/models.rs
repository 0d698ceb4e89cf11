//! Domain models for the todo store.
//!
//! These models are storage-agnostic. A `TodoList` is an aggregate: it is
//! always read and written together with its full task sequence.

use serde::{Deserialize, Serialize};

/// 8-character hex ID type used for lists and tasks.
pub type Id = String;

/// A named, ordered collection of tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoList {
    pub id: Id,
    pub name: String,
    /// Tasks in sequence order. Owned by the list.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Optimistic concurrency token, bumped on every write.
    #[serde(default)]
    pub version: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl TodoList {
    /// A list that has not been persisted yet. The store assigns id and timestamps.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            tasks: vec![],
            version: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// Remove a task from the sequence, returning it if it was present.
    pub fn remove_task(&mut self, task_id: &str) -> Option<Task> {
        let index = self.tasks.iter().position(|t| t.id == task_id)?;
        Some(self.tasks.remove(index))
    }
}

/// A single to-do item within a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: Id,
    /// Owning list.
    pub list_id: Id,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub order: i64,
    pub created_at: String,
    pub updated_at: String,
}

impl Task {
    /// A task that has not been persisted yet: not completed, order 0.
    pub fn new(list_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            list_id: list_id.into(),
            text: text.into(),
            completed: false,
            order: 0,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }
}
