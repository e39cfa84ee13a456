//! Todo store trait definitions.

use async_trait::async_trait;
use entities::{Todo, TodoPatch};

use crate::TodoStoreResult;

/// Trait for todo storage operations.
///
/// Implementations return fully normalized [`Todo`] values. Task text is
/// validated by the caller before it reaches the store.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Lists all todos, newest first.
    async fn list_todos(&self) -> TodoStoreResult<Vec<Todo>>;

    /// Gets a todo by ID.
    async fn get_todo(&self, id: i64) -> TodoStoreResult<Option<Todo>>;

    /// Creates a new, not yet completed todo.
    async fn create_todo(&self, task: &str) -> TodoStoreResult<Todo>;

    /// Applies a partial update.
    ///
    /// Returns `None` if no todo has the given ID. Nothing is written in that
    /// case.
    async fn update_todo(&self, id: i64, patch: &TodoPatch) -> TodoStoreResult<Option<Todo>>;

    /// Deletes a todo. Deleting a missing ID is not an error.
    async fn delete_todo(&self, id: i64) -> TodoStoreResult<()>;
}
