//! Task module
//!
//! This module contains task-related types and the remote task service.

mod http_store;
mod memory_store;
mod model;
mod repository;

pub use http_store::HttpTaskRepository;
pub use memory_store::InMemoryTaskRepository;
pub use model::*;
pub use repository::TaskRepository;
