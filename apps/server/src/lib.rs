//! Todo server
//!
//! Exposes a small JSON API for listing, creating, updating and deleting
//! todos. Storage is either an embedded SQLite file or a remote PostgREST
//! table, selected once at startup.

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod state;

use std::sync::Arc;

use axum::Router;
use todo_store::TodoStore;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::{AppState, create_shared_state};

/// Creates the application router with all routes configured.
pub fn create_app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    api::create_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

/// Creates the application state around the selected store.
pub fn create_state(store: Arc<dyn TodoStore>) -> Arc<AppState> {
    create_shared_state(store)
}

/// Initializes tracing with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();
}
