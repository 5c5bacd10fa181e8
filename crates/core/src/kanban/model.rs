//! Kanban board model definitions
//!
//! The local task store: tasks from the last fetch, kept both in fetch
//! order and partitioned into one column per status.

use serde::Serialize;
use std::collections::HashMap;
use tracing::warn;

use crate::task::{Task, TaskStatus};

/// Where a task card sits on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub status: TaskStatus,
    pub index: usize,
}

/// A column in the kanban board
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardColumn {
    pub id: TaskStatus,
    pub title: String,
    pub task_ids: Vec<String>,
}

impl BoardColumn {
    fn new(id: TaskStatus) -> Self {
        Self {
            id,
            title: id.title().to_string(),
            task_ids: Vec::new(),
        }
    }
}

/// The complete kanban board state
///
/// Every task id appears in exactly one column, the one matching its status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardState {
    tasks: HashMap<String, Task>,
    order: Vec<String>,
    columns: HashMap<TaskStatus, BoardColumn>,
    column_order: Vec<TaskStatus>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Create a new empty board state
    pub fn new() -> Self {
        Self {
            tasks: HashMap::new(),
            order: Vec::new(),
            columns: TaskStatus::ALL
                .into_iter()
                .map(|status| (status, BoardColumn::new(status)))
                .collect(),
            column_order: TaskStatus::ALL.to_vec(),
        }
    }

    /// Build the board from a fetched collection, keeping fetch order
    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let mut state = Self::new();
        for task in tasks {
            if state.tasks.contains_key(&task.id) {
                warn!("Ignoring duplicate task id in fetch result: {}", task.id);
                continue;
            }
            state.push(task);
        }
        state
    }

    fn push(&mut self, task: Task) {
        let id = task.id.clone();
        if let Some(column) = self.columns.get_mut(&task.status) {
            column.task_ids.push(id.clone());
        }
        self.order.push(id.clone());
        self.tasks.insert(id, task);
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Get a task by ID
    pub fn get(&self, task_id: &str) -> Option<&Task> {
        self.tasks.get(task_id)
    }

    /// Tasks in the order the server returned them
    pub fn flat(&self) -> Vec<&Task> {
        self.order.iter().filter_map(|id| self.tasks.get(id)).collect()
    }

    /// Tasks in one column, top to bottom
    pub fn column(&self, status: TaskStatus) -> Vec<&Task> {
        self.columns
            .get(&status)
            .map(|column| {
                column
                    .task_ids
                    .iter()
                    .filter_map(|id| self.tasks.get(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Columns in display order
    pub fn columns(&self) -> impl Iterator<Item = &BoardColumn> {
        self.column_order
            .iter()
            .filter_map(|status| self.columns.get(status))
    }

    /// Find the column and position of a task card
    pub fn locate(&self, task_id: &str) -> Option<Placement> {
        let status = self.tasks.get(task_id)?.status;
        let index = self
            .columns
            .get(&status)?
            .task_ids
            .iter()
            .position(|id| id == task_id)?;
        Some(Placement { status, index })
    }

    /// Move a task card to a column and position, returning where it was
    ///
    /// `target_index` is clamped to the column length; `None` appends.
    pub fn move_task(
        &mut self,
        task_id: &str,
        target_status: TaskStatus,
        target_index: Option<usize>,
    ) -> Option<Placement> {
        let origin = self.locate(task_id)?;

        if let Some(old_column) = self.columns.get_mut(&origin.status) {
            old_column.task_ids.remove(origin.index);
        }

        if let Some(new_column) = self.columns.get_mut(&target_status) {
            let index = target_index
                .unwrap_or(new_column.task_ids.len())
                .min(new_column.task_ids.len());
            new_column.task_ids.insert(index, task_id.to_string());
        }

        if let Some(task) = self.tasks.get_mut(task_id) {
            task.status = target_status;
        }

        Some(origin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> BoardState {
        BoardState::from_tasks(vec![
            Task::new("t1", "First"),
            Task::new("t2", "Second").with_status(TaskStatus::InProgress),
            Task::new("t3", "Third"),
            Task::new("t4", "Fourth").with_status(TaskStatus::Done),
        ])
    }

    fn ids(tasks: Vec<&Task>) -> Vec<&str> {
        tasks.into_iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_new_board_state() {
        let state = BoardState::new();
        assert!(state.is_empty());
        let titles: Vec<_> = state.columns().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["To Do", "In Progress", "Done"]);
    }

    #[test]
    fn test_from_tasks_partitions_by_status() {
        let state = sample();
        assert_eq!(state.len(), 4);
        assert_eq!(ids(state.flat()), vec!["t1", "t2", "t3", "t4"]);
        assert_eq!(ids(state.column(TaskStatus::Todo)), vec!["t1", "t3"]);
        assert_eq!(ids(state.column(TaskStatus::InProgress)), vec!["t2"]);
        assert_eq!(ids(state.column(TaskStatus::Done)), vec!["t4"]);
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let state = BoardState::from_tasks(vec![
            Task::new("t1", "First"),
            Task::new("t1", "Again").with_status(TaskStatus::Done),
        ]);
        assert_eq!(state.len(), 1);
        assert_eq!(state.get("t1").unwrap().title, "First");
        assert!(state.column(TaskStatus::Done).is_empty());
    }

    #[test]
    fn test_move_task_between_columns() {
        let mut state = sample();
        let origin = state.move_task("t3", TaskStatus::Done, Some(0)).unwrap();

        assert_eq!(origin, Placement { status: TaskStatus::Todo, index: 1 });
        assert_eq!(state.get("t3").unwrap().status, TaskStatus::Done);
        assert_eq!(ids(state.column(TaskStatus::Todo)), vec!["t1"]);
        assert_eq!(ids(state.column(TaskStatus::Done)), vec!["t3", "t4"]);
    }

    #[test]
    fn test_move_task_within_column_and_clamp() {
        let mut state = sample();
        state.move_task("t1", TaskStatus::Todo, Some(99)).unwrap();
        assert_eq!(ids(state.column(TaskStatus::Todo)), vec!["t3", "t1"]);
        assert_eq!(state.locate("t1"), Some(Placement { status: TaskStatus::Todo, index: 1 }));
    }

    #[test]
    fn test_move_back_restores_placement() {
        let mut state = sample();
        let origin = state.move_task("t1", TaskStatus::InProgress, None).unwrap();
        state.move_task("t1", origin.status, Some(origin.index));
        assert_eq!(ids(state.column(TaskStatus::Todo)), vec!["t1", "t3"]);
        assert_eq!(ids(state.column(TaskStatus::InProgress)), vec!["t2"]);
    }

    #[test]
    fn test_move_unknown_task() {
        let mut state = sample();
        assert!(state.move_task("nope", TaskStatus::Done, None).is_none());
    }

    #[test]
    fn test_every_task_in_exactly_one_matching_column() {
        let mut state = sample();
        state.move_task("t2", TaskStatus::Todo, Some(1));
        state.move_task("t4", TaskStatus::InProgress, None);

        for task in state.flat() {
            let hits: Vec<_> = state
                .columns()
                .filter(|c| c.task_ids.contains(&task.id))
                .map(|c| c.id)
                .collect();
            assert_eq!(hits, vec![task.status]);
        }
    }
}
