use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Status given to every newly created task.
pub const DEFAULT_STATUS: &str = "Pending";

/// Represents a task entity as stored and returned by the API.
///
/// `status` is free text; the dashboard uses "Pending" and "Completed".
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub status: String,
    /// Identifier of the user who owns the task.
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a pending task owned by `owner_id`.
    pub fn new(title: String, owner_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            status: DEFAULT_STATUS.to_string(),
            owner_id,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, changes: TaskChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(status) = changes.status {
            self.status = status;
        }
    }
}

/// Payload of `POST /api/tasks`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// Required; absence and the empty string are rejected by the handler.
    #[validate(length(max = 200))]
    pub title: Option<String>,
}

impl TaskInput {
    /// The title as sent, or `None` if it is missing or blank.
    pub fn title(&self) -> Option<String> {
        non_blank(self.title.as_deref())
    }
}

/// Payload of `PUT /api/tasks/{id}`: only the fields present are changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TaskUpdate {
    #[validate(length(max = 200))]
    pub title: Option<String>,
    #[validate(length(max = 50))]
    pub status: Option<String>,
}

/// Normalised partial update handed to the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    pub title: Option<String>,
    pub status: Option<String>,
}

impl From<TaskUpdate> for TaskChanges {
    fn from(update: TaskUpdate) -> Self {
        Self {
            title: non_blank(update.title.as_deref()),
            status: non_blank(update.status.as_deref()),
        }
    }
}

/// Whitespace only decides emptiness; a kept value is stored untrimmed.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let owner = Uuid::new_v4();
        let task = Task::new("Buy milk".to_string(), owner);

        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, "Pending");
        assert_eq!(task.owner_id, owner);
    }

    #[test]
    fn test_task_input_title() {
        assert_eq!(TaskInput { title: None }.title(), None);
        assert_eq!(
            TaskInput {
                title: Some("   ".to_string())
            }
            .title(),
            None
        );
        assert_eq!(
            TaskInput {
                title: Some(" Buy milk ".to_string())
            }
            .title()
            .as_deref(),
            Some(" Buy milk ")
        );
    }

    #[test]
    fn test_task_input_validation() {
        let long_title = TaskInput {
            title: Some("a".repeat(201)),
        };
        assert!(long_title.validate().is_err());

        let valid = TaskInput {
            title: Some("Valid Title".to_string()),
        };
        assert!(valid.validate().is_ok());
    }

    #[test]
    fn test_partial_update() {
        let mut task = Task::new("Buy milk".to_string(), Uuid::new_v4());

        task.apply(
            TaskUpdate {
                status: Some("Completed".to_string()),
                ..Default::default()
            }
            .into(),
        );
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.status, "Completed");

        task.apply(
            TaskUpdate {
                title: Some("x".to_string()),
                status: Some("".to_string()),
            }
            .into(),
        );
        assert_eq!(task.title, "x");
        assert_eq!(task.status, "Completed");

        task.apply(
            TaskUpdate {
                title: Some("  padded ".to_string()),
                status: Some("   ".to_string()),
            }
            .into(),
        );
        assert_eq!(task.title, "  padded ");
        assert_eq!(task.status, "Completed");
    }

    #[test]
    fn test_task_serializes_owner_id() {
        let owner = Uuid::new_v4();
        let task = Task::new("Buy milk".to_string(), owner);
        let json = serde_json::to_value(&task).unwrap();

        assert_eq!(json["ownerId"], owner.to_string());
        assert_eq!(json["status"], "Pending");
    }
}
