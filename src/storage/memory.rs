//! In-memory task store (ephemeral server mode and test double)

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use super::tasks::Task;
use super::TaskStore;
use crate::error::{Result, TodoError};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tasks: RwLock<Vec<Task>>,
    fail_writes: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following `save_all` fail, simulating an unwritable store
    #[allow(dead_code)] // test hook
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of successful `save_all` calls
    #[allow(dead_code)] // test hook
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }
}

impl TaskStore for MemoryStore {
    fn load_all(&self) -> Vec<Task> {
        match self.tasks.read() {
            Ok(tasks) => tasks.clone(),
            Err(_) => Vec::new(),
        }
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(TodoError::storage("memory store is read-only"));
        }
        let mut guard = self
            .tasks
            .write()
            .map_err(|_| TodoError::storage("memory store lock poisoned"))?;
        *guard = tasks.to_vec();
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
