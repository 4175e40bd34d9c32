use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TodoError};

/// Date format used for `fecha_creacion` / `fecha_limite`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single to-do item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique, immutable after creation
    pub id: u64,
    /// Free-text grouping label
    #[serde(rename = "etiqueta")]
    pub tag: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    /// Creation date (YYYY-MM-DD), never changes
    #[serde(rename = "fecha_creacion")]
    pub created_at: String,
    /// Due date (YYYY-MM-DD)
    #[serde(rename = "fecha_limite")]
    pub due_date: String,
    #[serde(rename = "completado", default)]
    pub completed: bool,
}

/// Persisted document: `{ "tasks": [ ... ] }`
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TasksFile {
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// Next id under the max+1 policy. An empty store starts at 1.
///
/// `len + 1` would hand out a live id again after any delete, so the
/// maximum is used instead. Fails once the id space is exhausted.
pub fn next_id(tasks: &[Task]) -> Result<u64> {
    let max = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    max.checked_add(1)
        .ok_or_else(|| TodoError::storage(format!("no id left after {}", max)))
}

/// Group tasks by tag for display. Stored order is kept inside each group.
pub fn group_by_tag(tasks: &[Task]) -> BTreeMap<String, Vec<Task>> {
    let mut groups: BTreeMap<String, Vec<Task>> = BTreeMap::new();
    for task in tasks {
        groups.entry(task.tag.clone()).or_default().push(task.clone());
    }
    groups
}

/// Today's date in the local timezone, formatted for `fecha_creacion`
pub fn today() -> String {
    Local::now().format(DATE_FORMAT).to_string()
}

/// Check that `value` is a `YYYY-MM-DD` calendar date
pub fn is_valid_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, DATE_FORMAT).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: u64, tag: &str) -> Task {
        Task {
            id,
            tag: tag.to_string(),
            description: format!("task {}", id),
            created_at: "2024-02-01".to_string(),
            due_date: "2024-02-10".to_string(),
            completed: false,
        }
    }

    #[test]
    fn test_next_id_empty_store() {
        assert_eq!(next_id(&[]).unwrap(), 1);
    }

    #[test]
    fn test_next_id_uses_max_not_len() {
        // Only id 5 survives: len + 1 would hand out 2, then 3, 4, 5 again.
        let tasks = vec![task(2, "a"), task(5, "b")];
        assert_eq!(next_id(&tasks).unwrap(), 6);
        assert_eq!(next_id(&[task(5, "b")]).unwrap(), 6);
    }

    #[test]
    fn test_next_id_exhausted() {
        let tasks = vec![task(3, "a"), task(u64::MAX, "b")];
        assert!(matches!(next_id(&tasks), Err(TodoError::Storage(_))));
    }

    #[test]
    fn test_group_by_tag_keeps_order() {
        let tasks = vec![task(1, "Work"), task(2, "Home"), task(3, "Work")];
        let groups = group_by_tag(&tasks);

        assert_eq!(groups.len(), 2);
        let work: Vec<u64> = groups["Work"].iter().map(|t| t.id).collect();
        assert_eq!(work, vec![1, 3]);
        assert_eq!(groups["Home"][0].id, 2);
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(task(1, "Work")).unwrap();
        assert_eq!(json["etiqueta"], "Work");
        assert_eq!(json["descripcion"], "task 1");
        assert_eq!(json["fecha_creacion"], "2024-02-01");
        assert_eq!(json["fecha_limite"], "2024-02-10");
        assert_eq!(json["completado"], false);
    }

    #[test]
    fn test_missing_completado_defaults_false() {
        let json = r#"{"id":4,"etiqueta":"x","descripcion":"y","fecha_creacion":"2024-01-01","fecha_limite":"2024-01-02"}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert!(!task.completed);
    }

    #[test]
    fn test_is_valid_date() {
        assert!(is_valid_date("2024-02-10"));
        assert!(!is_valid_date("2024-02-30"));
        assert!(!is_valid_date("10/02/2024"));
        assert!(!is_valid_date(""));
    }

    #[test]
    fn test_today_is_valid_date() {
        assert!(is_valid_date(&today()));
    }
}
