//! In-memory task service
//!
//! Behaves like the remote task service: assigns ids on create and keeps
//! insertion order. Used in tests and offline demos.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::model::{NewTask, Task, TaskPatch};
use super::repository::TaskRepository;
use crate::{Error, Result};

#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
    requests: AtomicUsize,
    failures: AtomicUsize,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with the given tasks already stored
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
            ..Self::default()
        }
    }

    /// Make the next `n` calls fail with a server error
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    /// Number of calls received so far, failed ones included
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        let failed = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failed {
            return Err(Error::Api {
                status: 500,
                message: "Internal Server Error".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> Result<Vec<Task>> {
        self.begin()?;
        Ok(self.tasks.read().await.clone())
    }

    async fn create(&self, task: NewTask) -> Result<Task> {
        self.begin()?;
        let now = Utc::now();
        let created = Task {
            id: Uuid::new_v4().simple().to_string(),
            title: task.title,
            description: task.description,
            assigned_to: task.assigned_to,
            status: task.status,
            created_at: Some(now),
            updated_at: Some(now),
        };
        self.tasks.write().await.push(created.clone());
        Ok(created)
    }

    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task> {
        self.begin()?;
        let mut tasks = self.tasks.write().await;
        let task = tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::TaskNotFound(id.to_string()))?;
        task.apply(&patch);
        task.updated_at = Some(Utc::now());
        Ok(task.clone())
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.begin()?;
        let mut tasks = self.tasks.write().await;
        let before = tasks.len();
        tasks.retain(|t| t.id != id);
        if tasks.len() == before {
            return Err(Error::TaskNotFound(id.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            description: "desc".to_string(),
            assigned_to: "Alex".to_string(),
            status: TaskStatus::Todo,
        }
    }

    #[tokio::test]
    async fn test_create_assigns_unique_ids() {
        let repo = InMemoryTaskRepository::new();
        let a = repo.create(new_task("A")).await.unwrap();
        let b = repo.create(new_task("B")).await.unwrap();
        assert_ne!(a.id, b.id);

        let titles: Vec<_> = repo.list().await.unwrap().into_iter().map(|t| t.title).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[tokio::test]
    async fn test_update_and_delete_unknown_id() {
        let repo = InMemoryTaskRepository::new();
        let err = repo
            .update("missing", TaskPatch::status(TaskStatus::Done))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::TaskNotFound(_)));
        assert!(repo.delete("missing").await.is_err());
    }

    #[tokio::test]
    async fn test_fail_next() {
        let repo = InMemoryTaskRepository::new();
        repo.fail_next(1);
        assert!(matches!(repo.list().await, Err(Error::Api { status: 500, .. })));
        assert!(repo.list().await.is_ok());
        assert_eq!(repo.request_count(), 2);
    }
}
