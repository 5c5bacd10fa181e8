//! Error types for the core library

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("Server returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    /// Build an `InvalidInput` error for a required field left blank
    pub fn required(field: &str) -> Self {
        Self::InvalidInput(format!("{} is required", field))
    }
}
