//! Task ordering service.
//!
//! Implements the list and task operations on top of the `Database`
//! abstraction. The store is injected; the service keeps no state of its own.

mod error;
pub mod ordering;
mod todo_service;


pub use error::{TodoError, TodoResult};
pub use ordering::reorder_dropping_omitted;
pub use todo_service::TodoService;
