//! Service-level errors.
//!
//! Every store failure is folded into one of four outcomes that the
//! transport layer maps onto HTTP status classes.

use miette::Diagnostic;
use thiserror::Error;

use crate::db::DbError;

#[derive(Error, Diagnostic, Debug)]
pub enum TodoError {
    #[error("{message}")]
    #[diagnostic(code(todos::service::validation))]
    Validation { message: String },

    #[error("{entity_type} not found")]
    #[diagnostic(code(todos::service::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("List '{id}' was modified by another request")]
    #[diagnostic(
        code(todos::service::conflict),
        help("Reload the list and retry the operation.")
    )]
    Conflict { id: String },

    #[error(transparent)]
    #[diagnostic(code(todos::service::store))]
    Store(DbError),
}

impl TodoError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        TodoError::Validation {
            message: message.into(),
        }
    }

    pub(crate) fn task_not_found(task_id: &str) -> Self {
        TodoError::NotFound {
            entity_type: "Task".to_string(),
            id: task_id.to_string(),
        }
    }
}

impl From<DbError> for TodoError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { entity_type, id } => {
                let entity_type = match entity_type.as_str() {
                    "TodoList" => "List".to_string(),
                    _ => entity_type,
                };
                TodoError::NotFound { entity_type, id }
            }
            DbError::Validation { message } => TodoError::Validation { message },
            DbError::Conflict { id, .. } => TodoError::Conflict { id },
            other => TodoError::Store(other),
        }
    }
}

pub type TodoResult<T> = Result<T, TodoError>;
