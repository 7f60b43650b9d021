use std::sync::Arc;

use taskboard_core::{ListResult, ServiceError};
use taskboard_sql::{Row, SQLStore, Value};

use crate::model::{PriorityCount, StatusCount, Task, TaskListQuery, TaskReport, TaskStatus};

/// Default page size for task listings.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Schema for the tasks table: full record as JSON in `data`, plus
/// indexed columns for filtering, ordering and aggregation. The CHECK
/// constraint enforces the status enumeration at the persistence layer.
const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS tasks (
        id          TEXT PRIMARY KEY,
        data        TEXT NOT NULL,
        title       TEXT NOT NULL,
        status      TEXT NOT NULL CHECK (status IN ('todo', 'doing', 'done')),
        priority    BIGINT NOT NULL,
        city        TEXT NOT NULL,
        created_at  TEXT NOT NULL
    )",
    "CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_priority ON tasks(priority)",
    "CREATE INDEX IF NOT EXISTS idx_tasks_created_at ON tasks(created_at)",
];

/// Persistent storage for tasks, backed by [`SQLStore`].
pub struct TaskStore {
    db: Arc<dyn SQLStore>,
}

impl TaskStore {
    /// Create a new TaskStore and initialise the schema.
    pub fn new(db: Arc<dyn SQLStore>) -> Result<Self, ServiceError> {
        for stmt in SCHEMA {
            db.exec(stmt, &[])
                .map_err(|e| ServiceError::Storage(format!("tasks schema init: {e}")))?;
        }
        Ok(Self { db })
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Insert a new task.
    pub fn create(&self, task: &Task) -> Result<(), ServiceError> {
        let data =
            serde_json::to_string(task).map_err(|e| ServiceError::Internal(e.to_string()))?;

        self.db
            .exec(
                "INSERT INTO tasks (id, data, title, status, priority, city, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                &[
                    Value::Text(task.id.clone()),
                    Value::Text(data),
                    Value::Text(task.title.clone()),
                    Value::Text(task.status.as_str().to_string()),
                    Value::Integer(task.priority),
                    Value::Text(task.city.clone()),
                    Value::Text(task.created_at.clone()),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(())
    }

    /// Get a task by id.
    pub fn get(&self, id: &str) -> Result<Task, ServiceError> {
        let rows = self
            .db
            .query(
                "SELECT data FROM tasks WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let row = rows
            .first()
            .ok_or_else(|| ServiceError::NotFound(format!("task '{id}' not found")))?;

        row_to_task(row)
    }

    /// Replace a task's data and indexed columns. Zero affected rows means
    /// the id is unknown.
    pub fn update(&self, task: &Task) -> Result<(), ServiceError> {
        let data =
            serde_json::to_string(task).map_err(|e| ServiceError::Internal(e.to_string()))?;

        let affected = self
            .db
            .exec(
                "UPDATE tasks SET data = ?1, title = ?2, status = ?3, priority = ?4, city = ?5 \
                 WHERE id = ?6",
                &[
                    Value::Text(data),
                    Value::Text(task.title.clone()),
                    Value::Text(task.status.as_str().to_string()),
                    Value::Integer(task.priority),
                    Value::Text(task.city.clone()),
                    Value::Text(task.id.clone()),
                ],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("task '{}' not found", task.id)));
        }
        Ok(())
    }

    /// Delete a task by id.
    pub fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let affected = self
            .db
            .exec(
                "DELETE FROM tasks WHERE id = ?1",
                &[Value::Text(id.to_string())],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("task '{id}' not found")));
        }
        Ok(())
    }

    /// Delete every task. Returns how many rows were removed.
    pub fn delete_all(&self) -> Result<u64, ServiceError> {
        self.db
            .exec("DELETE FROM tasks", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }

    // -----------------------------------------------------------------------
    // List / Query
    // -----------------------------------------------------------------------

    /// List tasks ordered by `created_at` descending, with optional
    /// status/priority filters and limit/offset pagination.
    pub fn list(&self, query: &TaskListQuery) -> Result<ListResult<Task>, ServiceError> {
        let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE);
        let offset = query.offset.unwrap_or(0);

        let mut where_clauses: Vec<String> = Vec::new();
        let mut params: Vec<Value> = Vec::new();
        let mut idx = 1;

        if let Some(status) = query.status {
            where_clauses.push(format!("status = ?{idx}"));
            params.push(Value::Text(status.as_str().to_string()));
            idx += 1;
        }
        if let Some(priority) = query.priority {
            where_clauses.push(format!("priority = ?{idx}"));
            params.push(Value::Integer(priority));
            idx += 1;
        }

        let where_sql = if where_clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", where_clauses.join(" AND "))
        };

        // Count total
        let count_sql = format!("SELECT COUNT(*) as cnt FROM tasks {where_sql}");
        let count_rows = self
            .db
            .query(&count_sql, &params)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        let total = count_rows
            .first()
            .and_then(|r| r.integer("cnt"))
            .unwrap_or(0) as usize;

        // Fetch page
        let select_sql = format!(
            "SELECT data FROM tasks {where_sql} ORDER BY created_at DESC LIMIT ?{idx} OFFSET ?{}",
            idx + 1
        );
        let mut select_params = params;
        select_params.push(Value::Integer(limit as i64));
        select_params.push(Value::Integer(offset as i64));

        let rows = self
            .db
            .query(&select_sql, &select_params)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let items = rows
            .iter()
            .map(row_to_task)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ListResult { items, total })
    }

    // -----------------------------------------------------------------------
    // Aggregation
    // -----------------------------------------------------------------------

    /// Whole-collection report: total, counts by status (ordered by status
    /// name), counts by priority (ascending). Groups with no members are
    /// not reported.
    pub fn report(&self) -> Result<TaskReport, ServiceError> {
        let total_rows = self
            .db
            .query("SELECT COUNT(*) as cnt FROM tasks", &[])
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        let total = total_rows
            .first()
            .and_then(|r| r.integer("cnt"))
            .unwrap_or(0);

        let status_rows = self
            .db
            .query(
                "SELECT status, COUNT(*) as cnt FROM tasks GROUP BY status ORDER BY status",
                &[],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let mut by_status = Vec::with_capacity(status_rows.len());
        for row in &status_rows {
            let name = row
                .text("status")
                .ok_or_else(|| ServiceError::Storage("missing status column".into()))?;
            let status = TaskStatus::from_str(name)
                .ok_or_else(|| ServiceError::Storage(format!("unexpected status '{name}'")))?;
            by_status.push(StatusCount {
                status,
                count: row.integer("cnt").unwrap_or(0),
            });
        }

        let priority_rows = self
            .db
            .query(
                "SELECT priority, COUNT(*) as cnt FROM tasks GROUP BY priority ORDER BY priority",
                &[],
            )
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        let by_priority = priority_rows
            .iter()
            .map(|row| PriorityCount {
                priority: row.integer("priority").unwrap_or(0),
                count: row.integer("cnt").unwrap_or(0),
            })
            .collect();

        Ok(TaskReport {
            total,
            by_status,
            by_priority,
        })
    }
}

/// Deserialize a Task from a row's `data` JSON column.
fn row_to_task(row: &Row) -> Result<Task, ServiceError> {
    let json = row
        .text("data")
        .ok_or_else(|| ServiceError::Storage("missing data column".into()))?;
    serde_json::from_str(json).map_err(|e| ServiceError::Storage(format!("bad task json: {e}")))
}
