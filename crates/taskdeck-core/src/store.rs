use crate::{Error, Result, Task};

/// Authoritative in-memory collection of task records.
///
/// Tasks keep their insertion order; `list` never sorts. The store carries
/// no locking of its own. A composition root that shares it across async
/// callers wraps it in `Arc<RwLock<_>>` and passes clones of the handle
/// down to the repository and query call sites.
#[derive(Debug, Clone, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a task by id. Absence is not an error.
    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    /// All tasks in insertion order.
    pub fn list(&self) -> &[Task] {
        &self.tasks
    }

    /// Add a task. Fails if the id is already present.
    pub fn insert(&mut self, task: Task) -> Result<()> {
        if self.get(&task.id).is_some() {
            return Err(Error::DuplicateTask(task.id));
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Swap the task stored under `id` for `task`, keeping its position.
    pub fn replace(&mut self, id: &str, task: Task) -> Result<()> {
        match self.tasks.iter_mut().find(|existing| existing.id == id) {
            Some(slot) => {
                *slot = task;
                Ok(())
            }
            None => Err(Error::TaskNotFound(id.to_string())),
        }
    }

    /// Remove and return the task stored under `id`. A second remove of the
    /// same id fails with the same error.
    pub fn remove(&mut self, id: &str) -> Result<Task> {
        match self.tasks.iter().position(|task| task.id == id) {
            Some(index) => Ok(self.tasks.remove(index)),
            None => Err(Error::TaskNotFound(id.to_string())),
        }
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TaskDraft;
    use chrono::Utc;

    fn task(id: &str, title: &str) -> Task {
        Task::from_draft(TaskDraft::new(title, "details", "user-1"), id, Utc::now())
    }

    #[test]
    fn test_insert_and_get() {
        let mut store = TaskStore::new();
        store.insert(task("1", "First")).unwrap();

        assert_eq!(store.get("1").unwrap().title, "First");
        assert!(store.get("2").is_none());
    }

    #[test]
    fn test_duplicate_insert_fails() {
        let mut store = TaskStore::new();
        store.insert(task("1", "First")).unwrap();

        let result = store.insert(task("1", "Again"));
        assert!(matches!(result, Err(Error::DuplicateTask(_))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut store = TaskStore::new();
        store.insert(task("b", "Second")).unwrap();
        store.insert(task("a", "First")).unwrap();
        store.insert(task("c", "Third")).unwrap();

        let ids: Vec<&str> = store.list().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut store = TaskStore::new();
        store.insert(task("1", "First")).unwrap();
        store.insert(task("2", "Second")).unwrap();

        store.replace("1", task("1", "Renamed")).unwrap();

        assert_eq!(store.list()[0].title, "Renamed");
        assert_eq!(store.list()[1].title, "Second");
    }

    #[test]
    fn test_replace_missing_fails() {
        let mut store = TaskStore::new();
        let result = store.replace("nope", task("nope", "Ghost"));
        assert!(matches!(result, Err(Error::TaskNotFound(_))));
    }

    #[test]
    fn test_remove_is_not_idempotent() {
        let mut store = TaskStore::new();
        store.insert(task("1", "First")).unwrap();

        let removed = store.remove("1").unwrap();
        assert_eq!(removed.title, "First");

        let second = store.remove("1");
        assert!(matches!(second, Err(Error::TaskNotFound(_))));
    }

    #[test]
    fn test_clear() {
        let mut store = TaskStore::new();
        store.insert(task("1", "First")).unwrap();
        store.clear();
        assert!(store.is_empty());
    }
}
