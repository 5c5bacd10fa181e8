//! HTTP task service client
//!
//! Talks to the remote `/api/tasks` resource.

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error};

use super::model::{NewTask, Task, TaskPatch};
use super::repository::TaskRepository;
use crate::config::ClientConfig;
use crate::http;
use crate::{Error, Result};

const TASKS_PATH: &str = "/api/tasks";

/// reqwest-backed client for the remote task service
#[derive(Clone)]
pub struct HttpTaskRepository {
    client: Client,
    base_url: String,
}

impl HttpTaskRepository {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: http::build_client(None),
            base_url: base_url.into(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            client: http::build_client(config.request_timeout),
            base_url: config.api_url.clone(),
        }
    }

    fn collection_url(&self) -> String {
        http::join(&self.base_url, TASKS_PATH)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/{}", self.collection_url(), urlencoding::encode(id))
    }
}

/// Decode a list body, rejecting anything that is not an array of tasks
fn parse_task_list(value: serde_json::Value) -> Result<Vec<Task>> {
    if !value.is_array() {
        error!("Unexpected data format: {}", value);
        return Err(Error::UnexpectedResponse(
            "expected an array of tasks".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| {
        error!("Unexpected task shape: {}", e);
        Error::UnexpectedResponse(format!("invalid task in list: {}", e))
    })
}

#[async_trait]
impl TaskRepository for HttpTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        let url = self.collection_url();
        debug!("GET {}", url);
        let res = self.client.get(&url).send().await?;
        let res = http::check(res, "Error fetching tasks").await?;
        let value: serde_json::Value = res
            .json()
            .await
            .map_err(|e| Error::UnexpectedResponse(format!("body is not JSON: {}", e)))?;
        parse_task_list(value)
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        let url = self.collection_url();
        debug!("POST {}", url);
        let res = self.client.post(&url).json(&task).send().await?;
        let res = http::check(res, "Error creating task").await?;
        res.json()
            .await
            .map_err(|e| Error::UnexpectedResponse(format!("invalid created task: {}", e)))
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        let url = self.item_url(id);
        debug!("PUT {}", url);
        let res = self.client.put(&url).json(&patch).send().await?;
        let res = http::check(res, "Error updating task").await?;
        res.json()
            .await
            .map_err(|e| Error::UnexpectedResponse(format!("invalid updated task: {}", e)))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.item_url(id);
        debug!("DELETE {}", url);
        let res = self.client.delete(&url).send().await?;
        http::check(res, "Error deleting task").await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_item_url_encodes_id() {
        let repo = HttpTaskRepository::new("http://api.test/");
        assert_eq!(repo.collection_url(), "http://api.test/api/tasks");
        assert_eq!(repo.item_url("a b/c"), "http://api.test/api/tasks/a%20b%2Fc");
    }

    #[test]
    fn test_parse_task_list_rejects_non_array() {
        let err = parse_task_list(json!({ "tasks": [] })).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));

        let err = parse_task_list(json!([{ "title": "no id" }])).unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_task_list() {
        let tasks = parse_task_list(json!([
            { "_id": "1", "title": "A", "status": "done" },
            { "_id": "2", "title": "B" }
        ]))
        .unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[1].id, "2");
    }
}
