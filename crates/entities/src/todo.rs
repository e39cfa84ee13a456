//! Todo entity definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    /// Backend-assigned identifier.
    pub id: i64,
    /// Task text, always trimmed and non-empty.
    pub task: String,
    /// Whether the task is done.
    pub completed: bool,
    /// Creation time. Never changes after insert.
    pub created_at: DateTime<Utc>,
}

/// Fields to change on an existing todo.
///
/// Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    /// New task text (already normalized).
    pub task: Option<String>,
    /// New completion flag.
    pub completed: Option<bool>,
}

impl TodoPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the task text.
    pub fn with_task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Sets the completion flag.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.task.is_none() && self.completed.is_none()
    }
}

/// Trims task text, returning `None` if nothing is left.
pub fn normalize_task(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_task_trims() {
        assert_eq!(normalize_task("  Buy milk\n"), Some("Buy milk".to_string()));
        assert_eq!(normalize_task("Buy milk"), Some("Buy milk".to_string()));
    }

    #[test]
    fn test_normalize_task_rejects_blank() {
        assert_eq!(normalize_task(""), None);
        assert_eq!(normalize_task("   "), None);
        assert_eq!(normalize_task("\t\n "), None);
    }

    #[test]
    fn test_patch_builder() {
        assert!(TodoPatch::new().is_empty());

        let patch = TodoPatch::new().with_completed(true);
        assert!(!patch.is_empty());
        assert_eq!(patch.task, None);
        assert_eq!(patch.completed, Some(true));

        let patch = TodoPatch::new().with_task("Walk dog");
        assert_eq!(patch.task.as_deref(), Some("Walk dog"));
        assert_eq!(patch.completed, None);
    }

    #[test]
    fn test_todo_serializes_four_fields() {
        let todo = Todo {
            id: 7,
            task: "Buy milk".to_string(),
            completed: false,
            created_at: DateTime::parse_from_rfc3339("2024-05-01T10:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };

        let value = serde_json::to_value(&todo).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 4);
        assert_eq!(value["id"], 7);
        assert_eq!(value["task"], "Buy milk");
        assert_eq!(value["completed"], false);
        assert_eq!(value["created_at"], "2024-05-01T10:00:00Z");
    }
}
