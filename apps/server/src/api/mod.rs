//! API endpoints.

pub mod extract;
pub mod page;
pub mod todo;

use std::sync::Arc;

use axum::{Router, routing::get};

use crate::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router() -> Router<Arc<AppState>> {
    Router::new()
        // Todo endpoints
        .route("/api/todos", get(todo::list_todos).post(todo::create_todo))
        .route(
            "/api/todos/{id}",
            get(todo::get_todo)
                .put(todo::update_todo)
                .delete(todo::delete_todo),
        )
        // Page
        .route("/", get(page::index))
        .route("/static/script.js", get(page::script))
        // Health check
        .route("/health", get(health_check))
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
