//! Database utility functions.

use chrono::Utc;
use uuid::Uuid;

/// Generate an 8-character hex ID for database entities
pub fn generate_entity_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(8);
    id
}

/// Generate an ID not present in `taken`.
///
/// Task ids only need to be unique within their list, so callers pass the
/// ids already used by sibling tasks.
pub fn generate_unique_id<'a, I>(taken: I) -> String
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    loop {
        let id = generate_entity_id();
        if !taken.clone().into_iter().any(|t| t == id) {
            return id;
        }
    }
}

/// Get current datetime as string in SQLite format
pub fn current_timestamp() -> String {
    Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}
