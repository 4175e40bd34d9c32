//! File-backed task store: one JSON document rewritten on every save.

use std::io;
use std::path::PathBuf;

use super::tasks::{Task, TasksFile};
use super::{load_json, save_json, TaskStore};
use crate::error::{Result, TodoError};

/// Default store location, relative to the working directory
pub const DEFAULT_TASKS_FILE: &str = "tasks.json";

/// Task store backed by a single `{ "tasks": [...] }` JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TaskStore for JsonFileStore {
    fn load_all(&self) -> Vec<Task> {
        match load_json::<TasksFile>(&self.path) {
            Ok(file) => {
                tracing::debug!(path = %self.path.display(), count = file.tasks.len(), "loaded tasks");
                file.tasks
            }
            Err(TodoError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "task file not found, starting empty");
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "task file unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn save_all(&self, tasks: &[Task]) -> Result<()> {
        let file = TasksFile {
            tasks: tasks.to_vec(),
        };
        save_json(&self.path, &file).map_err(|e| {
            TodoError::storage(format!("failed to write {}: {}", self.path.display(), e))
        })?;
        tracing::debug!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(id: u64) -> Task {
        Task {
            id,
            tag: "Work".to_string(),
            description: "Report".to_string(),
            created_at: "2024-02-01".to_string(),
            due_date: "2024-02-10".to_string(),
            completed: false,
        }
    }

    #[test]
    fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load_all().is_empty());
    }

    #[test]
    fn test_save_replaces_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tasks.json"));

        store.save_all(&[sample(1), sample(2)]).unwrap();
        store.save_all(&[sample(2)]).unwrap();

        let loaded = store.load_all();
        assert_eq!(loaded, vec![sample(2)]);
    }

    #[test]
    fn test_persisted_layout() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        let store = JsonFileStore::new(&path);
        store.save_all(&[sample(1)]).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let first = &raw["tasks"][0];
        assert_eq!(first["id"], 1);
        assert_eq!(first["etiqueta"], "Work");
        assert_eq!(first["descripcion"], "Report");
        assert_eq!(first["fecha_limite"], "2024-02-10");
        assert_eq!(first["completado"], false);
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes the rename fail.
        let path = dir.path().join("tasks.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("keep"), "x").unwrap();

        let store = JsonFileStore::new(&path);
        let err = store.save_all(&[sample(1)]).unwrap_err();
        assert!(matches!(err, TodoError::Storage(_)));
    }
}
