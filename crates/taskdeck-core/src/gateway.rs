use crate::error::{Result, TaskdeckError};
use crate::task::{Task, TaskDraft};
use reqwest::blocking::{Client, Response};
use reqwest::StatusCode;

// ---------------------------------------------------------------------------
// TaskGateway
// ---------------------------------------------------------------------------

/// Thin contract over the remote task API. One request per call, no
/// retries; every failure maps to exactly one error.
pub trait TaskGateway {
    /// `GET /tasks`
    fn list(&self) -> Result<Vec<Task>>;
    /// `GET /tasks/{id}`
    fn get(&self, id: &str) -> Result<Task>;
    /// `POST /tasks` — server assigns the id.
    fn create(&self, draft: &TaskDraft) -> Result<Task>;
    /// `PUT /tasks/{id}` — partial merge; the response may itself be
    /// partial, so it is returned as a patch for the caller to merge.
    fn update(&self, id: &str, draft: &TaskDraft) -> Result<TaskDraft>;
    /// `DELETE /tasks/{id}` — deleting an unknown id is NotFound, not a
    /// crash.
    fn delete(&self, id: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// HttpTaskGateway
// ---------------------------------------------------------------------------

pub struct HttpTaskGateway {
    client: Client,
    base_url: String,
}

impl HttpTaskGateway {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a non-2xx response to the error taxonomy. `subject` names the
    /// id (or endpoint) for NotFound messages.
    fn check(resp: Response, subject: &str) -> Result<Response> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp.text().unwrap_or_default();
        match status {
            StatusCode::NOT_FOUND => Err(TaskdeckError::NotFound(subject.to_string())),
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                Err(TaskdeckError::Validation(if message.is_empty() {
                    "request rejected by server".to_string()
                } else {
                    message
                }))
            }
            _ => Err(TaskdeckError::Api {
                status: status.as_u16(),
                message,
            }),
        }
    }
}

impl TaskGateway for HttpTaskGateway {
    fn list(&self) -> Result<Vec<Task>> {
        let resp = self.client.get(self.url("/tasks")).send()?;
        let mut tasks: Vec<Task> = Self::check(resp, "/tasks")?.json()?;
        for task in &mut tasks {
            task.sync_date();
        }
        Ok(tasks)
    }

    fn get(&self, id: &str) -> Result<Task> {
        let resp = self.client.get(self.url(&format!("/tasks/{id}"))).send()?;
        let mut task: Task = Self::check(resp, id)?.json()?;
        task.sync_date();
        Ok(task)
    }

    fn create(&self, draft: &TaskDraft) -> Result<Task> {
        let resp = self.client.post(self.url("/tasks")).json(draft).send()?;
        let mut task: Task = Self::check(resp, "/tasks")?.json()?;
        task.sync_date();
        Ok(task)
    }

    fn update(&self, id: &str, draft: &TaskDraft) -> Result<TaskDraft> {
        let resp = self
            .client
            .put(self.url(&format!("/tasks/{id}")))
            .json(draft)
            .send()?;
        let patch: TaskDraft = Self::check(resp, id)?.json()?;
        Ok(patch)
    }

    fn delete(&self, id: &str) -> Result<()> {
        let resp = self
            .client
            .delete(self.url(&format!("/tasks/{id}")))
            .send()?;
        Self::check(resp, id)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
