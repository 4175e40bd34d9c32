//! Shared state handed to every API handler.

use std::sync::Arc;

use crate::operations::tasks::TaskService;

/// Injected into handlers through axum's `State` extractor
#[derive(Clone)]
pub struct AppState {
    pub tasks: Arc<TaskService>,
}

impl AppState {
    pub fn new(tasks: TaskService) -> Self {
        Self {
            tasks: Arc::new(tasks),
        }
    }
}
