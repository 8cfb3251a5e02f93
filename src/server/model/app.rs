//! Application state for the HTTP server.

use sea_orm::DatabaseConnection;

use crate::server::{config::DEFAULT_MAX_CONCURRENT_SYNCS, service::sync::ProviderSyncOrchestrator};

/// State shared with every HTTP handler
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Provider sync orchestrator, shared with the scheduler
    pub orchestrator: ProviderSyncOrchestrator,
}

/// Builds application state from a database connection and an HTTP client, using the default
/// sync concurrency. Lets test contexts produce an `AppState` without depending on this crate.
impl From<(DatabaseConnection, reqwest::Client)> for AppState {
    fn from((db, http_client): (DatabaseConnection, reqwest::Client)) -> Self {
        let orchestrator =
            ProviderSyncOrchestrator::new(db.clone(), http_client, DEFAULT_MAX_CONCURRENT_SYNCS);

        Self { db, orchestrator }
    }
}
