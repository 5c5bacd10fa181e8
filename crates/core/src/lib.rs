//! Core library for the Task Board client
//!
//! This crate contains the client-side business logic, including:
//! - Task model and the remote task service seam
//! - Kanban board state and its controller
//! - Authentication, session and navigation state

pub mod auth;
pub mod config;
pub mod error;
mod http;
pub mod kanban;
pub mod notice;
pub mod route;
pub mod session;
pub mod task;

pub use error::Error;
pub type Result<T> = std::result::Result<T, Error>;
