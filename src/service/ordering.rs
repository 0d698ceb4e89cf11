//! Task ordering rules.
//!
//! Kept free of any storage concerns so the reorder semantics can be
//! revisited in one place.

use std::collections::HashMap;

use crate::db::Task;

/// Rebuild a task sequence from the requested id order.
///
/// Each known id is taken once, in request order, and its `order` is set to
/// its position in the result, not its index in `task_ids`: `[a, bogus, b]`
/// yields `a = 0, b = 1`, so orders stay gapless. Unknown ids and repeated
/// ids are skipped. Every returned task gets `updated_at = now`.
///
/// Tasks whose id is not requested are **dropped**: the caller replaces the
/// list's sequence with the returned one, so omitted tasks leave the list.
pub fn reorder_dropping_omitted(tasks: Vec<Task>, task_ids: &[String], now: &str) -> Vec<Task> {
    let mut by_id: HashMap<String, Task> = tasks.into_iter().map(|t| (t.id.clone(), t)).collect();

    task_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .enumerate()
        .map(|(position, mut task)| {
            task.order = position as i64;
            task.updated_at = now.to_string();
            task
        })
        .collect()
}
