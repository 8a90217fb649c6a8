//! Wire schema of the todo collaborator and its mapping to the task model.
//!
//! The collaborator stores `{id, title, details, date, isDone}`. That shape
//! has no priority, assignee, creator, or timestamp columns, and collapses
//! status to a done flag, so mapping a task onto it is lossy: `in-progress`
//! is indistinguishable from `todo` after a round trip, priority reads back
//! as `medium`, and assignment reads back as unassigned. The loss is
//! inherited behavior, kept on purpose and asserted by tests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use taskdeck_core::{task, Priority, Task, TaskDraft, TaskStatus};

use crate::{Error, Result};

/// Row shape the collaborator serves and accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoRow {
    pub id: i64,
    pub title: String,
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    pub is_done: bool,
}

/// Creation payload; the collaborator assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTodoRow {
    pub title: String,
    pub details: String,
    pub date: Option<DateTime<Utc>>,
    pub is_done: bool,
}

/// Parse an opaque task id back into the collaborator's integer key.
/// An id the collaborator never issued cannot name one of its records.
pub fn wire_id(id: &str) -> Result<i64> {
    id.parse::<i64>()
        .map_err(|_| Error::NotFound(id.to_string()))
}

pub fn new_row_from_draft(draft: &TaskDraft) -> NewTodoRow {
    NewTodoRow {
        title: draft.title.clone(),
        details: draft.description.clone(),
        date: draft.due_date,
        is_done: draft.status == TaskStatus::Completed,
    }
}

pub fn row_from_task(task: &Task) -> Result<TodoRow> {
    Ok(TodoRow {
        id: wire_id(&task.id)?,
        title: task.title.clone(),
        details: task.description.clone(),
        date: task.due_date,
        is_done: task.status == TaskStatus::Completed,
    })
}

/// Map a collaborator row into a full task, validating required fields.
///
/// Fields the wire cannot carry are synthesized: priority defaults to
/// medium, assignment to none, `created_by` to the session user doing the
/// read, and both timestamps to the mapping instant.
pub fn task_from_row(row: TodoRow, created_by: &str, now: DateTime<Utc>) -> Result<Task> {
    task::validate_title(&row.title)?;
    task::validate_description(&row.details)?;

    let status = if row.is_done {
        TaskStatus::Completed
    } else {
        TaskStatus::Todo
    };

    Ok(Task {
        id: row.id.to_string(),
        title: row.title,
        description: row.details,
        status,
        priority: Priority::Medium,
        due_date: row.date,
        assigned_to: None,
        created_by: created_by.to_string(),
        created_at: now,
        updated_at: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: i64, is_done: bool) -> TodoRow {
        TodoRow {
            id,
            title: "Create project plan".to_string(),
            details: "Outline the project scope".to_string(),
            date: None,
            is_done,
        }
    }

    #[test]
    fn test_task_from_row_synthesizes_defaults() {
        let now = Utc::now();
        let task = task_from_row(row(7, false), "user-1", now).unwrap();

        assert_eq!(task.id, "7");
        assert_eq!(task.status, TaskStatus::Todo);
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.assigned_to.is_none());
        assert_eq!(task.created_by, "user-1");
        assert_eq!(task.created_at, now);
        assert_eq!(task.updated_at, now);
    }

    #[test]
    fn test_done_flag_maps_to_completed() {
        let now = Utc::now();
        let task = task_from_row(row(7, true), "user-1", now).unwrap();
        assert_eq!(task.status, TaskStatus::Completed);
    }

    #[test]
    fn test_in_progress_round_trips_as_todo() {
        // The collaborator's binary model cannot hold in-progress; after one
        // save/reload cycle it reads back as todo. Documented lossiness.
        let draft = TaskDraft::new("Research competitors", "Analyze strategies", "user-1")
            .with_status(TaskStatus::InProgress)
            .with_priority(Priority::High)
            .with_assignee("user-2");

        let wire = new_row_from_draft(&draft);
        assert!(!wire.is_done);

        let reloaded = task_from_row(
            TodoRow {
                id: 12,
                title: wire.title,
                details: wire.details,
                date: wire.date,
                is_done: wire.is_done,
            },
            "user-1",
            Utc::now(),
        )
        .unwrap();

        assert_eq!(reloaded.status, TaskStatus::Todo);
        assert_eq!(reloaded.priority, Priority::Medium);
        assert!(reloaded.assigned_to.is_none());
    }

    #[test]
    fn test_row_from_task_flattens_status() {
        let now = Utc::now();
        let mut task = task_from_row(row(3, false), "user-1", now).unwrap();

        task.status = TaskStatus::Completed;
        assert!(row_from_task(&task).unwrap().is_done);

        task.status = TaskStatus::InProgress;
        assert!(!row_from_task(&task).unwrap().is_done);
    }

    #[test]
    fn test_task_from_row_validates_required_fields() {
        let now = Utc::now();
        let mut bad = row(1, false);
        bad.title = String::new();

        assert!(matches!(
            task_from_row(bad, "user-1", now),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn test_wire_id_rejects_foreign_ids() {
        assert_eq!(wire_id("42").unwrap(), 42);
        assert!(matches!(wire_id("not-a-number"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_row_json_field_names() {
        let wire = serde_json::to_value(row(5, true)).unwrap();
        assert_eq!(wire["id"], 5);
        assert_eq!(wire["isDone"], true);
        assert!(wire.get("details").is_some());
        assert!(wire.get("is_done").is_none());
    }
}
