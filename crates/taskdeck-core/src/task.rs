use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Longest title the system accepts, in characters.
pub const MAX_TITLE_LEN: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

/// A unit of work with status, priority, assignment, and an optional due
/// date. `id`, `created_by`, and `created_at` are set once at creation and
/// never mutated afterwards; `updated_at` moves on every mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Materialize a draft into a full task. Both timestamps start equal.
    pub fn from_draft(draft: TaskDraft, id: impl Into<String>, now: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            title: draft.title,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            assigned_to: draft.assigned_to,
            created_by: draft.created_by,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied patch fields over this task and move `updated_at`.
    /// Only the whitelisted mutable fields can change; `id`, `created_by`,
    /// and `created_at` are not representable in a patch.
    pub fn apply_patch(&mut self, patch: &TaskPatch, now: DateTime<Utc>) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(assigned_to) = &patch.assigned_to {
            self.assigned_to = assigned_to.clone();
        }
        self.updated_at = now;
    }
}

/// A task payload lacking id and timestamps, used for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: Priority,
    pub due_date: Option<DateTime<Utc>>,
    pub assigned_to: Option<String>,
    pub created_by: String,
}

impl TaskDraft {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        created_by: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            status: TaskStatus::Todo,
            priority: Priority::Medium,
            due_date: None,
            assigned_to: None,
            created_by: created_by.into(),
        }
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_assignee(mut self, user_id: impl Into<String>) -> Self {
        self.assigned_to = Some(user_id.into());
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_title(&self.title)?;
        validate_description(&self.description)?;
        Ok(())
    }
}

/// Partial update with an explicit whitelist of mutable fields. The outer
/// `Option` means "field supplied"; for `due_date` and `assigned_to` the
/// inner `Option` lets a patch clear the value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub due_date: Option<Option<DateTime<Utc>>>,
    pub assigned_to: Option<Option<String>>,
}

impl TaskPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_due_date(mut self, due_date: Option<DateTime<Utc>>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    pub fn with_assignee(mut self, user_id: Option<String>) -> Self {
        self.assigned_to = Some(user_id);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.assigned_to.is_none()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            validate_title(title)?;
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }
        Ok(())
    }
}

pub fn validate_title(title: &str) -> Result<()> {
    if title.is_empty() {
        return Err(Error::Validation("title must not be empty".to_string()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(Error::Validation(format!(
            "title must be at most {} characters",
            MAX_TITLE_LEN
        )));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<()> {
    if description.is_empty() {
        return Err(Error::Validation(
            "description must not be empty".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> TaskDraft {
        TaskDraft::new("Create project plan", "Outline scope and timeline", "user-1")
    }

    #[test]
    fn test_from_draft_keeps_fields_and_equalizes_timestamps() {
        let now = Utc::now();
        let task = Task::from_draft(draft().with_priority(Priority::High), "42", now);

        assert_eq!(task.id, "42");
        assert_eq!(task.title, "Create project plan");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.created_by, "user-1");
        assert_eq!(task.created_at, task.updated_at);
    }

    #[test]
    fn test_draft_validation() {
        assert!(draft().validate().is_ok());

        let empty_title = TaskDraft::new("", "details", "user-1");
        assert!(matches!(
            empty_title.validate(),
            Err(Error::Validation(_))
        ));

        let empty_description = TaskDraft::new("title", "", "user-1");
        assert!(empty_description.validate().is_err());

        let long_title = TaskDraft::new("x".repeat(101), "details", "user-1");
        assert!(long_title.validate().is_err());

        let max_title = TaskDraft::new("x".repeat(100), "details", "user-1");
        assert!(max_title.validate().is_ok());
    }

    #[test]
    fn test_apply_patch_merges_only_supplied_fields() {
        let created = Utc::now();
        let mut task = Task::from_draft(draft(), "1", created);

        let later = created + chrono::Duration::seconds(5);
        task.apply_patch(&TaskPatch::new().with_status(TaskStatus::Completed), later);

        assert_eq!(task.status, TaskStatus::Completed);
        assert_eq!(task.title, "Create project plan");
        assert_eq!(task.priority, Priority::Medium);
        assert_eq!(task.id, "1");
        assert_eq!(task.created_by, "user-1");
        assert_eq!(task.created_at, created);
        assert!(task.updated_at > task.created_at);
    }

    #[test]
    fn test_patch_can_clear_optional_fields() {
        let now = Utc::now();
        let mut task = Task::from_draft(
            draft().with_due_date(now).with_assignee("user-2"),
            "1",
            now,
        );

        let patch = TaskPatch::new()
            .with_due_date(None)
            .with_assignee(None);
        task.apply_patch(&patch, now);

        assert!(task.due_date.is_none());
        assert!(task.assigned_to.is_none());
    }

    #[test]
    fn test_patch_validation() {
        assert!(TaskPatch::new().validate().is_ok());
        assert!(TaskPatch::new().with_title("ok").validate().is_ok());
        assert!(TaskPatch::new().with_title("").validate().is_err());
        assert!(TaskPatch::new()
            .with_title("x".repeat(101))
            .validate()
            .is_err());
        assert!(TaskPatch::new().with_description("").validate().is_err());
    }

    #[test]
    fn test_status_wire_spelling() {
        let json = serde_json::to_string(&TaskStatus::InProgress).unwrap();
        assert_eq!(json, "\"in-progress\"");

        let parsed: TaskStatus = serde_json::from_str("\"todo\"").unwrap();
        assert_eq!(parsed, TaskStatus::Todo);

        let json = serde_json::to_string(&Priority::High).unwrap();
        assert_eq!(json, "\"high\"");
    }
}
