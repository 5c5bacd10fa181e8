//! Kanban board controller
//!
//! Keeps the local board in step with the remote task service: every
//! successful mutation is followed by a full re-fetch, and drag-and-drop
//! moves the card locally before the status update is sent.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{debug, error, info, warn};

use crate::error::Error;
use crate::notice::{Notice, Notifier};
use crate::task::{Task, TaskDraft, TaskPatch, TaskRepository, TaskStatus};
use crate::Result;

use super::model::BoardState;

const FETCH_FAILED: &str = "Error fetching tasks!";
const CREATED: &str = "Task created successfully!";
const CREATE_FAILED: &str = "Error creating task!";
const UPDATED: &str = "Task updated successfully!";
const UPDATE_FAILED: &str = "Error updating task!";
const DELETED: &str = "Task deleted successfully!";
const DELETE_FAILED: &str = "Error deleting task!";

/// An inline title/description edit in progress
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEdit {
    pub id: String,
    pub title: String,
    pub description: String,
}

/// Column and position a card was dropped on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropTarget {
    pub status: TaskStatus,
    /// Position in the destination column; `None` appends
    pub index: Option<usize>,
}

/// End of a drag gesture on a task card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragEnd {
    pub task_id: String,
    /// `None` when the card was dropped outside any column
    pub destination: Option<DropTarget>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Dropped nowhere; nothing changed
    Cancelled,
    /// Reordered inside its column; nothing sent
    Reordered,
    /// Status update accepted by the server
    Moved,
}

struct Board {
    state: BoardState,
    /// Ticket of the fetch whose result `state` holds
    applied_fetch: u64,
}

/// Shared handle to the board; clones see the same state
#[derive(Clone)]
pub struct BoardController {
    repo: Arc<dyn TaskRepository>,
    board: Arc<RwLock<Board>>,
    fetch_ticket: Arc<AtomicU64>,
    notifier: Notifier,
}

impl BoardController {
    pub fn new(repo: Arc<dyn TaskRepository>) -> Self {
        Self::with_notifier(repo, Notifier::new())
    }

    pub fn with_notifier(repo: Arc<dyn TaskRepository>, notifier: Notifier) -> Self {
        Self {
            repo,
            board: Arc::new(RwLock::new(Board {
                state: BoardState::new(),
                applied_fetch: 0,
            })),
            fetch_ticket: Arc::new(AtomicU64::new(0)),
            notifier,
        }
    }

    /// Subscribe to success/error notices
    pub fn subscribe(&self) -> broadcast::Receiver<Notice> {
        self.notifier.subscribe()
    }

    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }

    /// Get the current board state
    pub async fn snapshot(&self) -> BoardState {
        self.board.read().await.state.clone()
    }

    /// Replace the board with the server's current collection
    ///
    /// On failure the previous board is kept. A response is dropped if a
    /// fetch issued later has already been applied.
    pub async fn fetch_all(&self) -> Result<()> {
        let ticket = self.fetch_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        let tasks = match self.repo.list().await {
            Ok(tasks) => tasks,
            Err(e) => {
                error!("Error fetching tasks: {}", e);
                self.notifier.error(FETCH_FAILED);
                return Err(e);
            }
        };

        let mut board = self.board.write().await;
        if ticket < board.applied_fetch {
            debug!(
                "Dropping stale fetch #{} (board holds #{})",
                ticket, board.applied_fetch
            );
            return Ok(());
        }
        board.state = BoardState::from_tasks(tasks);
        board.applied_fetch = ticket;
        debug!("Applied fetch #{} with {} tasks", ticket, board.state.len());
        Ok(())
    }

    async fn refresh(&self) {
        if let Err(e) = self.fetch_all().await {
            debug!("Refresh after mutation failed: {}", e);
        }
    }

    /// Submit the create form
    ///
    /// The draft is cleared only once the server accepted the task.
    pub async fn create(&self, draft: &mut TaskDraft) -> Result<Task> {
        let new_task = draft.validate().inspect_err(|e| {
            warn!("Task not submitted: {}", e);
        })?;

        match self.repo.create(new_task).await {
            Ok(task) => {
                info!("Created task {}", task.id);
                draft.clear();
                self.notifier.success(CREATED);
                self.refresh().await;
                Ok(task)
            }
            Err(e) => {
                error!("Error creating task: {}", e);
                self.notifier.error(CREATE_FAILED);
                Err(e)
            }
        }
    }

    /// Send a partial update, then re-fetch
    pub async fn update(&self, task_id: &str, patch: TaskPatch) -> Result<Task> {
        if patch.is_empty() {
            return Err(Error::InvalidInput("nothing to update".to_string()));
        }
        if patch.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            warn!("Task {} not updated: empty title", task_id);
            return Err(Error::required("title"));
        }

        match self.repo.update(task_id, patch).await {
            Ok(task) => {
                info!("Updated task {}", task_id);
                self.notifier.success(UPDATED);
                self.refresh().await;
                Ok(task)
            }
            Err(e) => {
                error!("Error updating task {}: {}", task_id, e);
                self.notifier.error(UPDATE_FAILED);
                Err(e)
            }
        }
    }

    /// Start editing a task with its current title and description
    pub async fn begin_edit(&self, task_id: &str) -> Result<TaskEdit> {
        let board = self.board.read().await;
        let task = board
            .state
            .get(task_id)
            .ok_or_else(|| Error::TaskNotFound(task_id.to_string()))?;
        Ok(TaskEdit {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
        })
    }

    pub async fn save_edit(&self, edit: &TaskEdit) -> Result<Task> {
        self.update(
            &edit.id,
            TaskPatch::content(edit.title.clone(), edit.description.clone()),
        )
        .await
    }

    pub async fn mark_done(&self, task_id: &str) -> Result<Task> {
        self.update(task_id, TaskPatch::status(TaskStatus::Done)).await
    }

    pub async fn delete(&self, task_id: &str) -> Result<()> {
        match self.repo.delete(task_id).await {
            Ok(()) => {
                info!("Deleted task {}", task_id);
                self.notifier.success(DELETED);
                self.refresh().await;
                Ok(())
            }
            Err(e) => {
                error!("Error deleting task {}: {}", task_id, e);
                self.notifier.error(DELETE_FAILED);
                Err(e)
            }
        }
    }

    /// Handle a card drop
    ///
    /// The card moves locally first. If the server rejects the status
    /// change the move is undone, unless a fetch has replaced the board
    /// in the meantime.
    pub async fn drag_end(&self, drag: DragEnd) -> Result<DragOutcome> {
        let Some(target) = drag.destination else {
            return Ok(DragOutcome::Cancelled);
        };

        let (origin, fetch_at_move) = {
            let mut board = self.board.write().await;
            let origin = board
                .state
                .move_task(&drag.task_id, target.status, target.index)
                .ok_or_else(|| Error::TaskNotFound(drag.task_id.clone()))?;
            (origin, board.applied_fetch)
        };

        if origin.status == target.status {
            debug!("Reordered task {} within {}", drag.task_id, target.status);
            return Ok(DragOutcome::Reordered);
        }

        debug!(
            "Moving task {} from {} to {}",
            drag.task_id, origin.status, target.status
        );

        match self
            .repo
            .update(&drag.task_id, TaskPatch::status(target.status))
            .await
        {
            Ok(_) => {
                self.notifier.success(UPDATED);
                self.refresh().await;
                Ok(DragOutcome::Moved)
            }
            Err(e) => {
                error!("Error moving task {}: {}", drag.task_id, e);
                {
                    let mut board = self.board.write().await;
                    let still_dropped = board
                        .state
                        .locate(&drag.task_id)
                        .is_some_and(|p| p.status == target.status);
                    if board.applied_fetch == fetch_at_move && still_dropped {
                        board
                            .state
                            .move_task(&drag.task_id, origin.status, Some(origin.index));
                    }
                }
                self.notifier.error(UPDATE_FAILED);
                Err(e)
            }
        }
    }
}
