//! Core task operations shared between the CLI and the Web API
//!
//! Every operation is one full cycle against the injected [`TaskStore`]:
//! load all tasks, change the in-memory list, save all tasks. Nothing is
//! saved when an operation fails.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{Result, TodoError};
use crate::quote::CompletionNotifier;
use crate::storage::tasks::{self, Task};
use crate::storage::TaskStore;

/// Fields for a new task. All three are required.
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub tag: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
}

/// Partial update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct TaskPatch {
    pub tag: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self.tag.is_none()
            && self.description.is_none()
            && self.due_date.is_none()
            && self.completed.is_none()
    }
}

/// Task operations over an injected store and completion notifier
pub struct TaskService {
    store: Arc<dyn TaskStore>,
    notifier: Arc<dyn CompletionNotifier>,
    /// Serializes load-modify-save cycles inside this process
    write_lock: Mutex<()>,
}

impl TaskService {
    pub fn new(store: Arc<dyn TaskStore>, notifier: Arc<dyn CompletionNotifier>) -> Self {
        Self {
            store,
            notifier,
            write_lock: Mutex::new(()),
        }
    }

    pub fn notifier(&self) -> &Arc<dyn CompletionNotifier> {
        &self.notifier
    }

    /// All tasks in stored order
    pub fn list(&self) -> Vec<Task> {
        self.store.load_all()
    }

    /// Tasks grouped by tag, for display only
    pub fn list_grouped(&self) -> BTreeMap<String, Vec<Task>> {
        tasks::group_by_tag(&self.list())
    }

    pub fn get(&self, id: u64) -> Result<Task> {
        self.list()
            .into_iter()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))
    }

    /// Create a task with id = max(existing) + 1
    pub fn create(&self, new_task: NewTask) -> Result<Task> {
        let tag = required_text("etiqueta", new_task.tag)?;
        let description = required_text("descripcion", new_task.description)?;
        let due_date = required_date("fecha_limite", new_task.due_date)?;

        let _guard = self.lock_writes()?;
        let mut all = self.store.load_all();
        let task = Task {
            id: tasks::next_id(&all)?,
            tag,
            description,
            created_at: tasks::today(),
            due_date,
            completed: false,
        };
        all.push(task.clone());
        self.store.save_all(&all)?;

        tracing::info!(task_id = task.id, tag = %task.tag, "task created");
        Ok(task)
    }

    /// Merge the supplied fields into an existing task
    pub fn update(&self, id: u64, patch: TaskPatch) -> Result<Task> {
        let tag = patch
            .tag
            .map(|v| required_text("etiqueta", Some(v)))
            .transpose()?;
        let description = patch
            .description
            .map(|v| required_text("descripcion", Some(v)))
            .transpose()?;
        let due_date = patch
            .due_date
            .map(|v| required_date("fecha_limite", Some(v)))
            .transpose()?;

        self.mutate(id, |task| {
            if let Some(tag) = tag {
                task.tag = tag;
            }
            if let Some(description) = description {
                task.description = description;
            }
            if let Some(due_date) = due_date {
                task.due_date = due_date;
            }
            if let Some(completed) = patch.completed {
                task.completed = completed;
            }
        })
        .inspect(|task| tracing::info!(task_id = task.id, "task updated"))
    }

    /// Mark a task completed. One-way and idempotent; the notifier is told
    /// about every successful call.
    pub fn complete(&self, id: u64) -> Result<Task> {
        let task = self.mutate(id, |task| task.completed = true)?;
        tracing::info!(task_id = task.id, "task completed");
        self.notifier.task_completed(&task);
        Ok(task)
    }

    /// Flip the completion flag, reading the current value inside the same
    /// load-modify-save cycle.
    pub fn toggle(&self, id: u64) -> Result<Task> {
        let task = self.mutate(id, |task| task.completed = !task.completed)?;
        tracing::info!(task_id = task.id, completed = task.completed, "task toggled");
        Ok(task)
    }

    /// Remove a task permanently, returning it
    pub fn delete(&self, id: u64) -> Result<Task> {
        let _guard = self.lock_writes()?;
        let mut all = self.store.load_all();
        let index = all
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        let removed = all.remove(index);
        self.store.save_all(&all)?;

        tracing::info!(task_id = id, "task deleted");
        Ok(removed)
    }

    fn mutate(&self, id: u64, apply: impl FnOnce(&mut Task)) -> Result<Task> {
        let _guard = self.lock_writes()?;
        let mut all = self.store.load_all();
        let task = all
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| not_found(id))?;
        apply(task);
        let updated = task.clone();
        self.store.save_all(&all)?;
        Ok(updated)
    }

    fn lock_writes(&self) -> Result<MutexGuard<'_, ()>> {
        self.write_lock
            .lock()
            .map_err(|_| TodoError::storage("task writer lock poisoned"))
    }
}

fn not_found(id: u64) -> TodoError {
    TodoError::not_found(format!("task {} does not exist", id))
}

fn required_text(field: &str, value: Option<String>) -> Result<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(TodoError::invalid_input(format!("{} is required", field))),
    }
}

fn required_date(field: &str, value: Option<String>) -> Result<String> {
    let value = required_text(field, value)?;
    if !tasks::is_valid_date(&value) {
        return Err(TodoError::invalid_input(format!(
            "{} must be a YYYY-MM-DD date, got {:?}",
            field, value
        )));
    }
    Ok(value)
}
