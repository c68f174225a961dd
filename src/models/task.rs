use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use super::not_blank;

/// Input structure for creating a task.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// What needs doing. Between 1 and 1000 characters, not just whitespace.
    #[validate(length(min = 1, max = 1000), custom = "not_blank")]
    pub description: String,

    /// Defaults to `false` when omitted.
    #[serde(default)]
    pub completed: bool,
}

/// Partial update of a task. Absent fields are left unchanged.
#[derive(Debug, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(min = 1, max = 1000), custom = "not_blank")]
    pub description: Option<String>,
    pub completed: Option<bool>,
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    /// Unique identifier for the task (UUID v4).
    pub id: Uuid,
    pub description: String,
    pub completed: bool,
    /// The user who created the task. Only they can see or change it.
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query parameters accepted when listing tasks.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct TaskQuery {
    pub completed: Option<bool>,
}

impl Task {
    /// Creates a new `Task` owned by `owner`, stamped with the current time.
    pub fn new(input: TaskInput, owner: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            description: input.description.trim().to_string(),
            completed: input.completed,
            owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a partial update and bumps `updated_at`.
    pub fn apply(&mut self, update: TaskUpdate) {
        if let Some(description) = update.description {
            self.description = description.trim().to_string();
        }
        if let Some(completed) = update.completed {
            self.completed = completed;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let owner = Uuid::new_v4();
        let input = TaskInput {
            description: " First task ".to_string(),
            completed: false,
        };

        let task = Task::new(input, owner);
        assert_eq!(task.description, "First task");
        assert_eq!(task.owner, owner);
        assert!(!task.completed);
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_completed_defaults_to_false() {
        let input: TaskInput = serde_json::from_str(r#"{"description":"New task"}"#).unwrap();
        assert!(!input.completed);
    }

    #[test]
    fn test_task_validation() {
        let valid_input = TaskInput {
            description: "Valid Task".to_string(),
            completed: false,
        };
        assert!(valid_input.validate().is_ok());

        let empty = TaskInput {
            description: "".to_string(),
            completed: false,
        };
        assert!(empty.validate().is_err());

        let too_long = TaskInput {
            description: "b".repeat(1001),
            completed: true,
        };
        assert!(too_long.validate().is_err());

        assert!(TaskUpdate::default().validate().is_ok());
        let empty_update = TaskUpdate {
            description: Some(String::new()),
            completed: None,
        };
        assert!(empty_update.validate().is_err());
    }

    #[test]
    fn test_whitespace_only_description_rejected() {
        let blank = TaskInput {
            description: "   \t ".to_string(),
            completed: false,
        };
        assert!(blank.validate().is_err());

        let blank_update = TaskUpdate {
            description: Some("  ".to_string()),
            completed: Some(true),
        };
        assert!(blank_update.validate().is_err());

        let padded = TaskInput {
            description: "  Buy milk  ".to_string(),
            completed: false,
        };
        assert!(padded.validate().is_ok());
    }

    #[test]
    fn test_apply_partial_update() {
        let mut task = Task::new(
            TaskInput {
                description: "Write report".to_string(),
                completed: false,
            },
            Uuid::new_v4(),
        );

        task.apply(TaskUpdate {
            description: None,
            completed: Some(true),
        });
        assert!(task.completed);
        assert_eq!(task.description, "Write report");
        assert!(task.updated_at >= task.created_at);
    }
}
