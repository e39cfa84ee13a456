//! Application state.

use std::sync::Arc;

use todo_store::TodoStore;

use crate::services::todo::TodoService;

/// Shared application state.
pub struct AppState {
    /// Todo service bound to the selected backend.
    pub todos: TodoService,
}

impl AppState {
    /// Creates new application state.
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self {
            todos: TodoService::new(store),
        }
    }
}

/// Creates shared state from the selected store.
pub fn create_shared_state(store: Arc<dyn TodoStore>) -> Arc<AppState> {
    Arc::new(AppState::new(store))
}
