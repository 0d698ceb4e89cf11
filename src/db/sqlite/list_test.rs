//! Tests for SqliteListRepository.

use crate::db::{Database, DbError, ListRepository, SqliteDatabase, Task, TodoList};

async fn setup_db() -> SqliteDatabase {
    let db = SqliteDatabase::in_memory()
        .await
        .expect("Failed to create in-memory database");
    db.migrate().await.expect("Migration should succeed");
    db
}

async fn create_list_with_tasks(db: &SqliteDatabase, name: &str, texts: &[&str]) -> TodoList {
    let mut list = db.lists().create(&TodoList::new(name)).await.unwrap();
    for text in texts {
        list.tasks.push(Task::new(&list.id, *text));
    }
    db.lists().save(&list).await.unwrap()
}

// =============================================================================
// create / get / list_all
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn create_assigns_id_and_timestamps() {
    let db = setup_db().await;

    let list = db
        .lists()
        .create(&TodoList::new("Groceries"))
        .await
        .expect("Create should succeed");

    assert_eq!(list.id.len(), 8);
    assert_eq!(list.name, "Groceries");
    assert!(list.tasks.is_empty());
    assert!(!list.created_at.is_empty());
    assert_eq!(list.created_at, list.updated_at);
}

#[tokio::test(flavor = "multi_thread")]
async fn create_ignores_tasks_on_input() {
    let db = setup_db().await;
    let mut input = TodoList::new("Groceries");
    input.tasks.push(Task::new("", "Milk"));

    let list = db.lists().create(&input).await.unwrap();
    assert!(list.tasks.is_empty());

    let fetched = db.lists().get(&list.id).await.unwrap();
    assert!(fetched.tasks.is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn create_rejects_blank_name() {
    let db = setup_db().await;

    for name in ["", "   "] {
        let result = db.lists().create(&TodoList::new(name)).await;
        assert!(
            matches!(result, Err(DbError::Validation { .. })),
            "name {:?} should be rejected",
            name
        );
    }

    assert!(db.lists().list_all().await.unwrap().is_empty());
}

#[tokio::test(flavor = "multi_thread")]
async fn get_missing_list_is_not_found() {
    let db = setup_db().await;

    let result = db.lists().get("deadbeef").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn list_all_returns_every_list_with_tasks() {
    let db = setup_db().await;
    let groceries = create_list_with_tasks(&db, "Groceries", &["Milk", "Eggs"]).await;
    let chores = create_list_with_tasks(&db, "Chores", &[]).await;

    let lists = db.lists().list_all().await.unwrap();
    assert_eq!(lists.len(), 2);

    let fetched_groceries = lists.iter().find(|l| l.id == groceries.id).unwrap();
    let texts: Vec<&str> = fetched_groceries
        .tasks
        .iter()
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(texts, vec!["Milk", "Eggs"]);

    let fetched_chores = lists.iter().find(|l| l.id == chores.id).unwrap();
    assert!(fetched_chores.tasks.is_empty());
}

// =============================================================================
// save
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn save_assigns_task_ids_unique_within_list() {
    let db = setup_db().await;
    let list = create_list_with_tasks(&db, "Groceries", &["Milk", "Eggs", "Bread"]).await;

    let mut ids: Vec<&str> = list.tasks.iter().map(|t| t.id.as_str()).collect();
    assert!(ids.iter().all(|id| id.len() == 8));
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert!(list.tasks.iter().all(|t| t.list_id == list.id));
}

#[tokio::test(flavor = "multi_thread")]
async fn save_preserves_sequence_and_fields() {
    let db = setup_db().await;
    let mut list = create_list_with_tasks(&db, "Groceries", &["Milk", "Eggs"]).await;

    list.tasks.swap(0, 1);
    list.tasks[0].completed = true;
    list.tasks[0].order = 7;
    let saved = db.lists().save(&list).await.unwrap();

    let fetched = db.lists().get(&list.id).await.unwrap();
    assert_eq!(fetched.tasks, saved.tasks);
    assert_eq!(fetched.tasks[0].text, "Eggs");
    assert!(fetched.tasks[0].completed);
    assert_eq!(fetched.tasks[0].order, 7);
    assert_eq!(fetched.tasks[1].text, "Milk");
    assert_eq!(fetched.tasks[1].order, 0);
}

#[tokio::test(flavor = "multi_thread")]
async fn save_replaces_task_sequence() {
    let db = setup_db().await;
    let mut list = create_list_with_tasks(&db, "Groceries", &["Milk", "Eggs"]).await;

    list.tasks.remove(0);
    db.lists().save(&list).await.unwrap();

    let fetched = db.lists().get(&list.id).await.unwrap();
    assert_eq!(fetched.tasks.len(), 1);
    assert_eq!(fetched.tasks[0].text, "Eggs");
}

#[tokio::test(flavor = "multi_thread")]
async fn save_bumps_version() {
    let db = setup_db().await;
    let list = db.lists().create(&TodoList::new("Groceries")).await.unwrap();
    assert_eq!(list.version, 0);

    let saved = db.lists().save(&list).await.unwrap();
    assert_eq!(saved.version, 1);

    let fetched = db.lists().get(&list.id).await.unwrap();
    assert_eq!(fetched.version, 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn save_with_stale_version_conflicts_and_writes_nothing() {
    let db = setup_db().await;
    let list = db.lists().create(&TodoList::new("Groceries")).await.unwrap();

    let mut first = db.lists().get(&list.id).await.unwrap();
    let mut second = db.lists().get(&list.id).await.unwrap();

    first.tasks.push(Task::new(&list.id, "Milk"));
    db.lists().save(&first).await.expect("First save wins");

    second.tasks.push(Task::new(&list.id, "Eggs"));
    let result = db.lists().save(&second).await;
    assert!(matches!(result, Err(DbError::Conflict { version: 0, .. })));

    let fetched = db.lists().get(&list.id).await.unwrap();
    assert_eq!(fetched.tasks.len(), 1);
    assert_eq!(fetched.tasks[0].text, "Milk");
}

#[tokio::test(flavor = "multi_thread")]
async fn save_missing_list_is_not_found() {
    let db = setup_db().await;
    let mut ghost = TodoList::new("Ghost");
    ghost.id = "deadbeef".to_string();

    let result = db.lists().save(&ghost).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

// =============================================================================
// rename / delete
// =============================================================================

#[tokio::test(flavor = "multi_thread")]
async fn rename_updates_name_and_keeps_tasks() {
    let db = setup_db().await;
    let list = create_list_with_tasks(&db, "Groceries", &["Milk"]).await;

    let renamed = db.lists().rename(&list.id, "Shopping").await.unwrap();
    assert_eq!(renamed.name, "Shopping");
    assert_eq!(renamed.tasks.len(), 1);
    assert_eq!(renamed.version, list.version + 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn rename_missing_list_is_not_found() {
    let db = setup_db().await;

    let result = db.lists().rename("deadbeef", "Shopping").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_cascades_to_tasks() {
    let db = setup_db().await;
    let list = create_list_with_tasks(&db, "Groceries", &["Milk", "Eggs"]).await;
    let other = create_list_with_tasks(&db, "Chores", &["Dishes"]).await;

    db.lists().delete(&list.id).await.expect("Delete should succeed");

    let result = db.lists().get(&list.id).await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM task WHERE list_id = ?")
        .bind(&list.id)
        .fetch_one(db.pool())
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let other = db.lists().get(&other.id).await.unwrap();
    assert_eq!(other.tasks.len(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn delete_missing_list_is_not_found() {
    let db = setup_db().await;

    let result = db.lists().delete("deadbeef").await;
    assert!(matches!(result, Err(DbError::NotFound { .. })));
}
