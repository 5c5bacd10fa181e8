//! Task model definitions

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Task status - one per board column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Todo
    }
}

impl TaskStatus {
    /// All statuses in column order
    pub const ALL: [TaskStatus; 3] = [Self::Todo, Self::InProgress, Self::Done];

    /// Wire spelling
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "todo",
            Self::InProgress => "inProgress",
            Self::Done => "done",
        }
    }

    /// Column heading shown on the board
    pub fn title(self) -> &'static str {
        match self {
            Self::Todo => "To Do",
            Self::InProgress => "In Progress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "inprogress" | "in-progress" | "in_progress" | "doing" => Ok(Self::InProgress),
            "done" => Ok(Self::Done),
            other => Err(Error::InvalidInput(format!("unknown status: {}", other))),
        }
    }
}

/// A task as returned by the remote task service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Server-assigned identifier
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub assigned_to: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a task with an already-assigned id
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            assigned_to: String::new(),
            status: TaskStatus::default(),
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the assignee
    pub fn with_assignee(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = assigned_to.into();
        self
    }

    /// Set the status
    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Apply the fields present in a patch
    pub fn apply(&mut self, patch: &TaskPatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

/// Body of a create request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
    #[serde(default)]
    pub status: TaskStatus,
}

/// Partial update; absent fields are left untouched by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn content(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            status: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.status.is_none()
    }
}

/// The create-task form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub assigned_to: String,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assigned_to: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            assigned_to: assigned_to.into(),
        }
    }

    /// Check required fields and build the create payload
    pub fn validate(&self) -> crate::Result<NewTask> {
        if self.title.trim().is_empty() {
            return Err(Error::required("title"));
        }
        if self.description.trim().is_empty() {
            return Err(Error::required("description"));
        }
        if self.assigned_to.trim().is_empty() {
            return Err(Error::required("assignedTo"));
        }
        Ok(NewTask {
            title: self.title.clone(),
            description: self.description.clone(),
            assigned_to: self.assigned_to.clone(),
            status: TaskStatus::Todo,
        })
    }

    pub fn clear(&mut self) {
        self.title.clear();
        self.description.clear();
        self.assigned_to.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.assigned_to.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&TaskStatus::InProgress).unwrap(), "\"inProgress\"");
        let status: TaskStatus = serde_json::from_str("\"done\"").unwrap();
        assert_eq!(status, TaskStatus::Done);
        assert!(serde_json::from_str::<TaskStatus>("\"archived\"").is_err());
    }

    #[test]
    fn test_status_from_str_aliases() {
        assert_eq!("todo".parse::<TaskStatus>().unwrap(), TaskStatus::Todo);
        assert_eq!("In-Progress".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert_eq!("doing".parse::<TaskStatus>().unwrap(), TaskStatus::InProgress);
        assert!("later".parse::<TaskStatus>().is_err());
    }

    #[test]
    fn test_task_deserializes_mongo_shape() {
        let json = r#"{
            "_id": "65f0c1",
            "title": "Write report",
            "description": "Q3 summary",
            "assignedTo": "Alex",
            "status": "todo",
            "createdAt": "2024-03-12T10:00:00.000Z",
            "__v": 0
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.id, "65f0c1");
        assert_eq!(task.assigned_to, "Alex");
        assert_eq!(task.status, TaskStatus::Todo);
        assert!(task.created_at.is_some());
        assert!(task.updated_at.is_none());
    }

    #[test]
    fn test_task_accepts_plain_id_and_missing_fields() {
        let task: Task = serde_json::from_str(r#"{"id": "t1", "title": "Bare"}"#).unwrap();
        assert_eq!(task.id, "t1");
        assert_eq!(task.description, "");
        assert_eq!(task.status, TaskStatus::Todo);
    }

    #[test]
    fn test_patch_skips_absent_fields() {
        let json = serde_json::to_value(TaskPatch::status(TaskStatus::Done)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "done" }));
        assert!(TaskPatch::default().is_empty());
    }

    #[test]
    fn test_draft_requires_every_field() {
        let draft = TaskDraft::new("  ", "Q3 summary", "Alex");
        assert!(matches!(draft.validate(), Err(Error::InvalidInput(_))));

        let draft = TaskDraft::new("Write report", "", "Alex");
        assert!(draft.validate().is_err());

        let draft = TaskDraft::new("Write report", "Q3 summary", "\t");
        assert!(draft.validate().is_err());

        let new_task = TaskDraft::new("Write report", "Q3 summary", "Alex")
            .validate()
            .unwrap();
        assert_eq!(new_task.status, TaskStatus::Todo);
        assert_eq!(
            serde_json::to_value(&new_task).unwrap(),
            serde_json::json!({
                "title": "Write report",
                "description": "Q3 summary",
                "assignedTo": "Alex",
                "status": "todo"
            })
        );
    }

    #[test]
    fn test_apply_patch() {
        let mut task = Task::new("t1", "Old").with_description("old desc");
        task.apply(&TaskPatch::content("New", "new desc"));
        assert_eq!(task.title, "New");
        assert_eq!(task.description, "new desc");
        assert_eq!(task.status, TaskStatus::Todo);
    }
}
