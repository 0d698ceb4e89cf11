//! Database error types.
//!
//! Storage-backend agnostic errors for the list store. Uses miette for
//! diagnostic output and thiserror for the derive macros.

use miette::Diagnostic;
use thiserror::Error;

/// Database operation errors.
#[derive(Error, Diagnostic, Debug)]
pub enum DbError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    #[diagnostic(code(todos::db::not_found))]
    NotFound { entity_type: String, id: String },

    #[error("Validation error: {message}")]
    #[diagnostic(code(todos::db::validation_error))]
    Validation { message: String },

    #[error("Conflict: {entity_type} '{id}' was modified concurrently (expected version {version})")]
    #[diagnostic(
        code(todos::db::conflict),
        help("Reload the list and apply the change again.")
    )]
    Conflict {
        entity_type: String,
        id: String,
        version: i64,
    },

    #[error("Database error: {message}")]
    #[diagnostic(code(todos::db::database_error))]
    Database { message: String },

    #[error("Migration error: {message}")]
    #[diagnostic(code(todos::db::migration_error))]
    Migration { message: String },

    #[error("Connection error: {message}")]
    #[diagnostic(code(todos::db::connection_error))]
    Connection { message: String },
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        DbError::Database {
            message: e.to_string(),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;
