//! API server CLI command

use std::sync::Arc;

use crate::api::{self, AppState};
use crate::operations::tasks::TaskService;
use crate::quote;
use crate::storage::config::Config;
use crate::storage::{JsonFileStore, MemoryStore, TaskStore};

/// Build the task service for the server from config
pub fn build_service(config: &Config, ephemeral: bool) -> TaskService {
    let store: Arc<dyn TaskStore> = if ephemeral {
        tracing::info!("ephemeral mode: tasks are kept in memory only");
        Arc::new(MemoryStore::new())
    } else {
        tracing::info!(path = %config.storage.path.display(), "using task file");
        Arc::new(JsonFileStore::new(&config.storage.path))
    };
    TaskService::new(store, quote::notifier_from_config(&config.quote))
}

/// Execute the API server
pub async fn execute(config: &Config, ephemeral: bool) {
    let state = AppState::new(build_service(config, ephemeral));

    if let Err(e) = api::start_server(&config.server.host, config.server.port, state).await {
        tracing::error!(error = %e, "API server error");
        std::process::exit(1);
    }
}
