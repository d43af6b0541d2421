//! Task model definitions

use serde::{Deserialize, Serialize};

/// Store-assigned task identifier (the SQLite rowid)
pub type TaskId = i64;

/// A single to-do item
///
/// The text field serializes as `task` to match the `taskItems` column name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(rename = "task")]
    pub text: String,
}

impl Task {
    /// Create a task record from a stored row
    pub fn new(id: TaskId, text: impl Into<String>) -> Self {
        Self {
            id,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task() {
        let task = Task::new(1, "Buy milk");
        assert_eq!(task.id, 1);
        assert_eq!(task.text, "Buy milk");
    }

    #[test]
    fn test_task_allows_empty_text() {
        let task = Task::new(7, "");
        assert!(task.text.is_empty());
    }

    #[test]
    fn test_task_json_uses_column_names() {
        let task = Task::new(2, "Walk dog");
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json, serde_json::json!({ "id": 2, "task": "Walk dog" }));

        let parsed: Task = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, task);
    }
}
