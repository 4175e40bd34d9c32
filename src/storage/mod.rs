pub mod config;
pub mod json_file;
pub mod memory;
pub mod tasks;

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::{Result, TodoError};
use tasks::Task;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// Persistence for the whole task collection.
///
/// Every mutation is a full `load_all` → modify → `save_all` cycle; there are
/// no partial writes. Reads fail open, writes never do.
pub trait TaskStore: Send + Sync {
    /// Load every task in stored order. A missing or unreadable backing
    /// store yields an empty list.
    fn load_all(&self) -> Vec<Task>;

    /// Replace the stored collection with `tasks`.
    fn save_all(&self, tasks: &[Task]) -> Result<()>;
}

/// Get the ~/.todo/ directory path
pub fn todo_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".todo"))
}

/// Deserialize a JSON file
pub fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Serialize `data` as pretty JSON and replace `path` with it.
///
/// The content goes to a temp file in the target's directory that is then
/// renamed over the target, so readers see either the old or the new
/// document. The temp file is removed if anything fails.
pub fn save_json<T: serde::Serialize>(path: &Path, data: &T) -> Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            std::fs::create_dir_all(parent)?;
            parent
        }
        None => Path::new("."),
    };

    let content = serde_json::to_string_pretty(data)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.persist(path).map_err(|e| TodoError::Io(e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
    }

    #[test]
    fn test_save_then_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("sample.json");

        let sample = Sample {
            name: "hello".to_string(),
        };
        save_json(&path, &sample).unwrap();

        let loaded: Sample = load_json(&path).unwrap();
        assert_eq!(loaded, sample);
        let entries = std::fs::read_dir(dir.path().join("nested")).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[test]
    fn test_failed_save_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("sample.json");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("keep"), "x").unwrap();

        let sample = Sample {
            name: "hello".to_string(),
        };
        assert!(matches!(save_json(&target, &sample), Err(TodoError::Io(_))));

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("sample.json")]);
    }

    #[test]
    fn test_load_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result: Result<Sample> = load_json(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(TodoError::Io(_))));
    }
}
