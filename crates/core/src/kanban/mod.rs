//! Kanban board management
//!
//! This module provides the board state shown in the three-column layout
//! (To Do, In Progress, Done) and the controller that syncs it with the
//! remote task service.

mod controller;
mod model;

pub use controller::*;
pub use model::*;
