//! Todo service.
//!
//! Validates input, forwards to whichever store was selected at startup, and
//! maps store results onto [`ServerError`].

use std::sync::Arc;

use entities::{Todo, TodoPatch, normalize_task};
use todo_store::TodoStore;

use crate::error::{ServerError, ServerResult};

/// Todo operations over the active store.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    /// Creates a service bound to `store`.
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    /// Name of the backend serving requests.
    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    /// Lists every todo, newest first.
    pub async fn list(&self) -> ServerResult<Vec<Todo>> {
        Ok(self.store.list_todos().await?)
    }

    /// Gets a single todo.
    pub async fn get(&self, id: i64) -> ServerResult<Todo> {
        self.store
            .get_todo(id)
            .await?
            .ok_or_else(ServerError::todo_not_found)
    }

    /// Creates a todo from raw task text.
    pub async fn create(&self, raw_task: &str) -> ServerResult<Todo> {
        let task = normalize_task(raw_task).ok_or_else(ServerError::empty_task)?;

        let todo = self.store.create_todo(&task).await?;

        tracing::info!(todo_id = todo.id, backend = self.backend_name(), "Todo created");

        Ok(todo)
    }

    /// Applies the fields that are present and returns the updated todo.
    ///
    /// An empty task rejects the whole update before anything is written.
    pub async fn update(
        &self,
        id: i64,
        raw_task: Option<&str>,
        completed: Option<bool>,
    ) -> ServerResult<Todo> {
        let mut patch = TodoPatch::new();
        if let Some(raw_task) = raw_task {
            let task = normalize_task(raw_task).ok_or_else(ServerError::empty_task)?;
            patch = patch.with_task(task);
        }
        if let Some(completed) = completed {
            patch = patch.with_completed(completed);
        }

        let todo = self
            .store
            .update_todo(id, &patch)
            .await?
            .ok_or_else(ServerError::todo_not_found)?;

        tracing::info!(
            todo_id = id,
            task_changed = patch.task.is_some(),
            completed = ?patch.completed,
            "Todo updated"
        );

        Ok(todo)
    }

    /// Deletes a todo. Missing IDs are not an error.
    pub async fn delete(&self, id: i64) -> ServerResult<()> {
        self.store.delete_todo(id).await?;

        tracing::info!(todo_id = id, "Todo deleted");

        Ok(())
    }
}
