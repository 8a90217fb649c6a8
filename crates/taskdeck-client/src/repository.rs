use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Response, StatusCode};
use tokio::sync::RwLock;

use taskdeck_core::{Task, TaskDraft, TaskPatch, TaskStore};

use crate::{wire, Error, Result, SessionUser};

/// CRUD facade over the todo collaborator.
///
/// Every operation awaits the collaborator to completion; there are no
/// internal retries and no cancellation. Failures surface once, as typed
/// errors.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn get_all(&self) -> Result<Vec<Task>>;
    async fn get_by_id(&self, id: &str) -> Result<Task>;
    async fn create(&self, draft: TaskDraft) -> Result<Task>;
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task>;
    async fn toggle_status(&self, id: &str) -> Result<Task>;
    async fn delete(&self, id: &str) -> Result<()>;
}

/// HTTP-backed repository speaking the collaborator's `/api/todoapi`
/// contract.
///
/// The shared [`TaskStore`] mirrors collaborator state: `get_all` refreshes
/// the whole snapshot, mutations keep the cached record in step. The
/// collaborator keeps no version field, so two sessions updating the same
/// id race and the later write wins.
pub struct HttpTaskRepository {
    http: Client,
    base_url: String,
    session: SessionUser,
    store: Arc<RwLock<TaskStore>>,
}

impl HttpTaskRepository {
    pub fn new(
        base_url: impl Into<String>,
        session: SessionUser,
        store: Arc<RwLock<TaskStore>>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
            store,
        }
    }

    fn todos_url(&self) -> String {
        format!("{}/api/todoapi", self.base_url)
    }

    fn todo_url(&self, id: i64) -> String {
        format!("{}/api/todoapi/{}", self.base_url, id)
    }

    fn unexpected(response: &Response) -> Error {
        Error::Transport(format!(
            "unexpected status {} from {}",
            response.status(),
            response.url()
        ))
    }

    async fn fetch_row(&self, id: &str) -> Result<wire::TodoRow> {
        let url = self.todo_url(wire::wire_id(id)?);
        let response = self.http.get(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(id.to_string())),
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(Self::unexpected(&response)),
        }
    }

    async fn cache_task(&self, task: &Task) -> Result<()> {
        let mut store = self.store.write().await;
        if store.get(&task.id).is_some() {
            store.replace(&task.id, task.clone())?;
        } else {
            store.insert(task.clone())?;
        }
        Ok(())
    }

    /// Drop a task from the cache. Ids the cache never held are fine; the
    /// collaborator has already confirmed the delete.
    async fn evict_task(&self, id: &str) {
        let _ = self.store.write().await.remove(id);
    }
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    /// Fetch every task, in collaborator order, and refresh the store
    /// snapshot.
    async fn get_all(&self) -> Result<Vec<Task>> {
        let response = self.http.get(self.todos_url()).send().await?;
        if !response.status().is_success() {
            return Err(Self::unexpected(&response));
        }

        let rows: Vec<wire::TodoRow> = response.json().await?;
        let now = Utc::now();
        let tasks = rows
            .into_iter()
            .map(|row| wire::task_from_row(row, &self.session.id, now))
            .collect::<Result<Vec<Task>>>()?;

        let mut store = self.store.write().await;
        store.clear();
        for task in &tasks {
            store.insert(task.clone())?;
        }

        Ok(tasks)
    }

    async fn get_by_id(&self, id: &str) -> Result<Task> {
        let row = self.fetch_row(id).await?;
        let task = wire::task_from_row(row, &self.session.id, Utc::now())?;
        self.cache_task(&task).await?;
        Ok(task)
    }

    /// Persist a draft. The collaborator assigns the id; the returned task
    /// keeps every draft field, so losses only appear on the next reload.
    async fn create(&self, draft: TaskDraft) -> Result<Task> {
        draft.validate()?;

        let body = wire::new_row_from_draft(&draft);
        let response = self
            .http
            .post(self.todos_url())
            .json(&body)
            .send()
            .await?;

        match response.status() {
            StatusCode::BAD_REQUEST => Err(Error::Validation(
                "collaborator rejected the payload".to_string(),
            )),
            status if status.is_success() => {
                let row: wire::TodoRow = response.json().await?;
                let task = Task::from_draft(draft, row.id.to_string(), Utc::now());
                self.cache_task(&task).await?;
                tracing::info!("Created task: {} ({})", task.title, task.id);
                Ok(task)
            }
            _ => Err(Self::unexpected(&response)),
        }
    }

    /// Merge supplied patch fields over the collaborator's current record
    /// and persist the result. Last write wins on concurrent updates.
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        patch.validate()?;

        let row = self.fetch_row(id).await?;
        let mut task = wire::task_from_row(row, &self.session.id, Utc::now())?;
        task.apply_patch(&patch, Utc::now());

        let body = wire::row_from_task(&task)?;
        let url = self.todo_url(body.id);
        let response = self.http.put(&url).json(&body).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(id.to_string())),
            StatusCode::BAD_REQUEST => Err(Error::Validation(
                "collaborator rejected the payload".to_string(),
            )),
            status if status.is_success() => {
                self.cache_task(&task).await?;
                tracing::info!("Updated task: {} ({})", task.title, task.id);
                Ok(task)
            }
            _ => Err(Self::unexpected(&response)),
        }
    }

    /// Flip done/undone through the collaborator. A completed task comes
    /// back `todo` (the wire cannot say which non-completed state it left).
    async fn toggle_status(&self, id: &str) -> Result<Task> {
        let url = format!("{}/toggle", self.todo_url(wire::wire_id(id)?));
        let response = self.http.patch(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(id.to_string())),
            status if status.is_success() => {
                let row: wire::TodoRow = response.json().await?;
                let task = wire::task_from_row(row, &self.session.id, Utc::now())?;
                self.cache_task(&task).await?;
                tracing::info!("Toggled task: {} ({})", task.title, task.id);
                Ok(task)
            }
            _ => Err(Self::unexpected(&response)),
        }
    }

    /// Hard removal, no tombstone. A second delete of the same id fails
    /// with `NotFound`.
    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.todo_url(wire::wire_id(id)?);
        let response = self.http.delete(&url).send().await?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(id.to_string())),
            status if status.is_success() => {
                self.evict_task(id).await;
                tracing::info!("Deleted task {}", id);
                Ok(())
            }
            _ => Err(Self::unexpected(&response)),
        }
    }
}
