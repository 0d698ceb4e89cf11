//! Tests for domain models.

use crate::db::models::*;

fn list_with_tasks(ids: &[&str]) -> TodoList {
    let mut list = TodoList::new("Groceries");
    list.id = "list0001".to_string();
    list.tasks = ids
        .iter()
        .map(|id| {
            let mut task = Task::new("list0001", format!("task {}", id));
            task.id = id.to_string();
            task
        })
        .collect();
    list
}

#[test]
fn new_task_defaults_to_open_with_order_zero() {
    let task = Task::new("list0001", "Milk");
    assert!(!task.completed);
    assert_eq!(task.order, 0);
    assert!(task.id.is_empty());
}

#[test]
fn new_list_starts_without_tasks() {
    let list = TodoList::new("Groceries");
    assert!(list.tasks.is_empty());
    assert_eq!(list.version, 0);
}

#[test]
fn remove_task_keeps_remaining_sequence() {
    let mut list = list_with_tasks(&["aaaa0001", "bbbb0002", "cccc0003"]);

    let removed = list.remove_task("bbbb0002").unwrap();
    assert_eq!(removed.id, "bbbb0002");

    let ids: Vec<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["aaaa0001", "cccc0003"]);
    assert!(list.remove_task("bbbb0002").is_none());
}

#[test]
fn task_deserializes_with_defaults() {
    let task: Task = serde_json::from_str(
        r#"{"id":"aaaa0001","list_id":"list0001","text":"Milk","created_at":"","updated_at":""}"#,
    )
    .unwrap();
    assert!(!task.completed);
    assert_eq!(task.order, 0);
}
