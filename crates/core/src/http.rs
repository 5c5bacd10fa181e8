//! Shared HTTP plumbing for the remote API clients

use std::time::Duration;

use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::warn;

use crate::error::Error;
use crate::Result;

#[derive(Deserialize)]
struct MessageBody {
    message: Option<String>,
}

/// Build the reqwest client shared by the API clients
pub(crate) fn build_client(timeout: Option<Duration>) -> Client {
    let mut builder = Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    builder.build().unwrap_or_else(|e| {
        warn!("Falling back to default HTTP client: {}", e);
        Client::new()
    })
}

/// Join a base URL and an API path
pub(crate) fn join(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Turn a non-2xx response into `Error::Api`, reading `{message}` when present
pub(crate) async fn check(res: Response, fallback: &str) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }

    let text = res.text().await.unwrap_or_default();
    let message = serde_json::from_str::<MessageBody>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string());

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_trims_trailing_slash() {
        assert_eq!(join("http://api.test/", "/api/tasks"), "http://api.test/api/tasks");
        assert_eq!(join("http://api.test", "/api/tasks"), "http://api.test/api/tasks");
    }
}
