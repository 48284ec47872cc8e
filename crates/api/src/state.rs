use std::sync::Arc;

use yatube_db::Store;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Storage backend (PostgreSQL or in-memory).
    pub store: Arc<dyn Store>,
    /// Server configuration (page size, title length, login URL, JWT).
    pub config: Arc<ServerConfig>,
}
