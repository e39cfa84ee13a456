//! Embedded SQLite todo store.

use std::path::Path;

use async_trait::async_trait;
use entities::{Todo, TodoPatch};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    FromRow, Pool, Sqlite,
};

use crate::{normalize::parse_created_at, TodoStore, TodoStoreResult};

/// SQL schema definition.
///
/// Kept compatible with databases created by earlier deployments.
const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    task TEXT NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;

const TODO_COLUMNS: &str = "id, task, completed, created_at";

/// Database row for Todo
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    task: String,
    completed: bool,
    created_at: Option<String>,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            task: row.task,
            completed: row.completed,
            created_at: parse_created_at(row.created_at.as_deref()),
        }
    }
}

/// Todo store backed by a local SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    pool: Pool<Sqlite>,
}

impl SqliteTodoStore {
    /// Opens (or creates) the database file and ensures the schema exists.
    pub async fn open(db_path: &Path) -> TodoStoreResult<Self> {
        // Ensure parent directory exists
        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let options = SqliteConnectOptions::new()
            .filename(db_path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;

        tracing::info!(path = %db_path.display(), "SQLite todo store opened");

        Ok(store)
    }

    /// Creates a private in-memory database (for tests).
    pub async fn in_memory() -> TodoStoreResult<Self> {
        // Every connection to :memory: is a separate database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let store = Self { pool };
        store.ensure_schema().await?;
        Ok(store)
    }

    /// Returns a reference to the connection pool
    pub fn pool(&self) -> &Pool<Sqlite> {
        &self.pool
    }

    async fn ensure_schema(&self) -> TodoStoreResult<()> {
        sqlx::query(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn list_todos(&self) -> TodoStoreResult<Vec<Todo>> {
        let rows: Vec<TodoRow> = sqlx::query_as(&format!(
            "SELECT {TODO_COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    async fn get_todo(&self, id: i64) -> TodoStoreResult<Option<Todo>> {
        let row: Option<TodoRow> =
            sqlx::query_as(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(row.map(Todo::from))
    }

    async fn create_todo(&self, task: &str) -> TodoStoreResult<Todo> {
        let row: TodoRow = sqlx::query_as(&format!(
            "INSERT INTO todos (task) VALUES (?) RETURNING {TODO_COLUMNS}"
        ))
        .bind(task)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(id = row.id, "Inserted todo row");

        Ok(row.into())
    }

    async fn update_todo(&self, id: i64, patch: &TodoPatch) -> TodoStoreResult<Option<Todo>> {
        if patch.is_empty() {
            return self.get_todo(id).await;
        }

        // Absent fields bind as NULL and keep the current value
        let row: Option<TodoRow> = sqlx::query_as(&format!(
            "UPDATE todos SET task = COALESCE(?, task), completed = COALESCE(?, completed) \
             WHERE id = ? RETURNING {TODO_COLUMNS}"
        ))
        .bind(patch.task.as_deref())
        .bind(patch.completed)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Todo::from))
    }

    async fn delete_todo(&self, id: i64) -> TodoStoreResult<()> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        tracing::debug!(id, rows_affected = result.rows_affected(), "Deleted todo row");

        Ok(())
    }
}
