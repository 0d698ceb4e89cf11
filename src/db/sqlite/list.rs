//! SQLite ListRepository implementation.
//!
//! Lists live in `todo_list`, their tasks in `task` with a `list_id`
//! back-reference and a `position` column holding the sequence index.

use std::collections::HashMap;

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, warn};

use crate::db::utils::{current_timestamp, generate_entity_id, generate_unique_id};
use crate::db::{DbError, DbResult, ListRepository, Task, TodoList};

const LIST_COLUMNS: &str = "id, name, version, created_at, updated_at";
const TASK_COLUMNS: &str = r#"id, list_id, text, completed, "order", created_at, updated_at"#;

/// SQLx-backed list repository.
pub struct SqliteListRepository {
    pub(crate) pool: SqlitePool,
}

impl ListRepository for SqliteListRepository {
    async fn list_all(&self) -> DbResult<Vec<TodoList>> {
        let list_rows = sqlx::query(&format!(
            "SELECT {} FROM todo_list ORDER BY created_at, rowid",
            LIST_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let task_rows = sqlx::query(&format!(
            "SELECT {} FROM task ORDER BY list_id, position",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        let mut tasks_by_list: HashMap<String, Vec<Task>> = HashMap::new();
        for task in task_rows.iter().map(row_to_task) {
            tasks_by_list
                .entry(task.list_id.clone())
                .or_default()
                .push(task);
        }

        Ok(list_rows
            .iter()
            .map(|row| {
                let mut list = row_to_list(row);
                list.tasks = tasks_by_list.remove(&list.id).unwrap_or_default();
                list
            })
            .collect())
    }

    async fn create(&self, list: &TodoList) -> DbResult<TodoList> {
        if list.name.trim().is_empty() {
            return Err(DbError::Validation {
                message: "List name is required".to_string(),
            });
        }

        // Use provided ID if not empty, otherwise generate one
        let id = if list.id.is_empty() {
            generate_entity_id()
        } else {
            list.id.clone()
        };
        let now = current_timestamp();

        sqlx::query(
            "INSERT INTO todo_list (id, name, version, created_at, updated_at) VALUES (?, ?, 0, ?, ?)",
        )
        .bind(&id)
        .bind(&list.name)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(TodoList {
            id,
            name: list.name.clone(),
            tasks: vec![],
            version: 0,
            created_at: now.clone(),
            updated_at: now,
        })
    }

    async fn get(&self, id: &str) -> DbResult<TodoList> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM todo_list WHERE id = ?",
            LIST_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let row = row.ok_or_else(|| list_not_found(id))?;
        let mut list = row_to_list(&row);

        list.tasks = sqlx::query(&format!(
            "SELECT {} FROM task WHERE list_id = ? ORDER BY position",
            TASK_COLUMNS
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .iter()
        .map(row_to_task)
        .collect();

        Ok(list)
    }

    async fn rename(&self, id: &str, name: &str) -> DbResult<TodoList> {
        let result = sqlx::query(
            "UPDATE todo_list SET name = ?, updated_at = ?, version = version + 1 WHERE id = ?",
        )
        .bind(name)
        .bind(current_timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(list_not_found(id));
        }

        self.get(id).await
    }

    async fn delete(&self, id: &str) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM task WHERE list_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query("DELETE FROM todo_list WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        if result.rows_affected() == 0 {
            return Err(list_not_found(id));
        }

        tx.commit().await?;
        Ok(())
    }

    async fn save(&self, list: &TodoList) -> DbResult<TodoList> {
        let mut tx = self.pool.begin().await?;
        let now = current_timestamp();

        // Compare-and-swap on the version token; a stale aggregate writes nothing.
        let result = sqlx::query(
            "UPDATE todo_list SET name = ?, updated_at = ?, version = version + 1
             WHERE id = ? AND version = ?",
        )
        .bind(&list.name)
        .bind(&now)
        .bind(&list.id)
        .bind(list.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM todo_list WHERE id = ?)")
                    .bind(&list.id)
                    .fetch_one(&mut *tx)
                    .await?;

            if !exists {
                return Err(list_not_found(&list.id));
            }

            warn!(list_id = %list.id, version = list.version, "Rejected stale list save");
            return Err(DbError::Conflict {
                entity_type: "TodoList".to_string(),
                id: list.id.clone(),
                version: list.version,
            });
        }

        sqlx::query("DELETE FROM task WHERE list_id = ?")
            .bind(&list.id)
            .execute(&mut *tx)
            .await?;

        let mut taken: Vec<String> = list
            .tasks
            .iter()
            .filter(|t| !t.id.is_empty())
            .map(|t| t.id.clone())
            .collect();
        let mut tasks = Vec::with_capacity(list.tasks.len());

        for (position, task) in list.tasks.iter().enumerate() {
            let mut task = task.clone();
            task.list_id = list.id.clone();
            if task.id.is_empty() {
                task.id = generate_unique_id(taken.iter().map(String::as_str));
                taken.push(task.id.clone());
            }
            if task.created_at.is_empty() {
                task.created_at = now.clone();
            }
            if task.updated_at.is_empty() {
                task.updated_at = now.clone();
            }

            sqlx::query(
                r#"
                INSERT INTO task (list_id, id, position, text, completed, "order", created_at, updated_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&task.list_id)
            .bind(&task.id)
            .bind(position as i64)
            .bind(&task.text)
            .bind(task.completed)
            .bind(task.order)
            .bind(&task.created_at)
            .bind(&task.updated_at)
            .execute(&mut *tx)
            .await?;

            tasks.push(task);
        }

        tx.commit().await?;
        debug!(list_id = %list.id, tasks = tasks.len(), "Saved list aggregate");

        Ok(TodoList {
            id: list.id.clone(),
            name: list.name.clone(),
            tasks,
            version: list.version + 1,
            created_at: list.created_at.clone(),
            updated_at: now,
        })
    }
}

fn list_not_found(id: &str) -> DbError {
    DbError::NotFound {
        entity_type: "TodoList".to_string(),
        id: id.to_string(),
    }
}

/// Convert a database row to a TodoList without its tasks.
fn row_to_list(row: &SqliteRow) -> TodoList {
    TodoList {
        id: row.get("id"),
        name: row.get("name"),
        tasks: vec![],
        version: row.get("version"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// Convert a database row to a Task model.
fn row_to_task(row: &SqliteRow) -> Task {
    Task {
        id: row.get("id"),
        list_id: row.get("list_id"),
        text: row.get("text"),
        completed: row.get("completed"),
        order: row.get("order"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}
