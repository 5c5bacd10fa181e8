//! Task repository trait
//!
//! Defines the interface to the remote task service.

use async_trait::async_trait;

use super::model::{NewTask, Task, TaskPatch};
use crate::Result;

/// Remote task service operations
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Get all tasks
    async fn list(&self) -> Result<Vec<Task>>;

    /// Create a new task; the server assigns the id
    async fn create(&self, task: NewTask) -> Result<Task>;

    /// Apply a partial update to an existing task
    async fn update(&self, id: &str, patch: TaskPatch) -> Result<Task>;

    /// Delete a task by ID
    async fn delete(&self, id: &str) -> Result<()>;
}
