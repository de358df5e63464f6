use std::sync::Arc;

use teamunited_db::store::ContentStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`).
#[derive(Clone)]
pub struct AppState {
    /// Content Store handles, one per table.
    pub store: ContentStore,
    /// Server configuration (session secret, fallback login).
    pub config: Arc<ServerConfig>,
}
