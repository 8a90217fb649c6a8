//! Read-only derivations over a task snapshot.
//!
//! Every function here is a pure function of `(tasks, now, parameters)`:
//! nothing mutates the snapshot, nothing suspends, and missing data (no due
//! date, empty list) degrades to empty output or a zero count rather than
//! an error. Calendar-day comparisons truncate in UTC.

use chrono::{DateTime, Utc};

use crate::{Priority, Task, TaskStatus};

/// Filter criteria. A task matches when every supplied criterion matches;
/// an absent criterion matches all tasks.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<Priority>,
    pub search: Option<String>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    fn matches(&self, task: &Task) -> bool {
        let matches_status = self.status.map_or(true, |status| task.status == status);
        let matches_priority = self
            .priority
            .map_or(true, |priority| task.priority == priority);
        let matches_search = self.search.as_ref().map_or(true, |search| {
            let needle = search.to_lowercase();
            task.title.to_lowercase().contains(&needle)
                || task.description.to_lowercase().contains(&needle)
        });

        matches_status && matches_priority && matches_search
    }
}

/// Tasks matching every supplied criterion, in input order.
pub fn filter(tasks: &[Task], criteria: &TaskFilter) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| criteria.matches(task))
        .cloned()
        .collect()
}

/// Tasks whose due date falls on the same UTC calendar day as `now`.
/// Tasks without a due date are excluded.
pub fn due_today(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    let today = now.date_naive();
    tasks
        .iter()
        .filter(|task| {
            task.due_date
                .map_or(false, |due| due.date_naive() == today)
        })
        .cloned()
        .collect()
}

/// Tasks due strictly after today, ascending by due date. Ties keep their
/// input order.
pub fn upcoming(tasks: &[Task], now: DateTime<Utc>) -> Vec<Task> {
    let today = now.date_naive();
    let mut result: Vec<Task> = tasks
        .iter()
        .filter(|task| {
            task.due_date
                .map_or(false, |due| due.date_naive() > today)
        })
        .cloned()
        .collect();

    result.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    result
}

/// The `limit` most recently updated tasks, most recent first. Ties keep
/// their input order.
pub fn recently_updated(tasks: &[Task], limit: usize) -> Vec<Task> {
    let mut result: Vec<Task> = tasks.to_vec();
    result.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    result.truncate(limit);
    result
}

pub fn count_by_priority(tasks: &[Task], priority: Priority) -> usize {
    tasks.iter().filter(|task| task.priority == priority).count()
}

pub fn count_by_status(tasks: &[Task], status: TaskStatus) -> usize {
    tasks.iter().filter(|task| task.status == status).count()
}
