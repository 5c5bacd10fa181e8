//! Client configuration read from the environment

use std::path::PathBuf;
use std::time::Duration;

pub const API_URL_VAR: &str = "TASKBOARD_API_URL";
pub const DATA_DIR_VAR: &str = "TASKBOARD_DATA_DIR";
pub const REQUEST_TIMEOUT_VAR: &str = "TASKBOARD_REQUEST_TIMEOUT_SECS";

const DEFAULT_API_URL: &str = "http://localhost:5000";
const DEFAULT_DATA_DIR: &str = ".taskboard";
const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Base URL of the remote API, without a trailing slash
    pub api_url: String,
    /// Directory holding client-side persistent state
    pub data_dir: PathBuf,
    /// Per-request timeout; `None` keeps the HTTP client's default
    pub request_timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            request_timeout: None,
        }
    }
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_url = non_empty(API_URL_VAR)
            .map(|v| normalize_url(&v))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let data_dir = non_empty(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        let request_timeout = non_empty(REQUEST_TIMEOUT_VAR).and_then(|raw| {
            match raw.trim().parse::<u64>() {
                Ok(0) => None,
                Ok(secs) => Some(Duration::from_secs(secs)),
                Err(_) => {
                    tracing::warn!("Ignoring invalid {}: {}", REQUEST_TIMEOUT_VAR, raw);
                    None
                }
            }
        });

        Self {
            api_url,
            data_dir,
            request_timeout,
        }
    }

    pub fn with_api_url(mut self, api_url: impl AsRef<str>) -> Self {
        self.api_url = normalize_url(api_url.as_ref());
        self
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    /// File backing the persisted session token
    pub fn session_file(&self) -> PathBuf {
        self.data_dir.join(SESSION_FILE)
    }
}

fn normalize_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.session_file(), PathBuf::from(".taskboard/session.json"));
    }

    #[test]
    fn test_env_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            (API_URL_VAR, "https://tasks.example.com/ "),
            (DATA_DIR_VAR, "/tmp/tb"),
            (REQUEST_TIMEOUT_VAR, "15"),
        ]));
        assert_eq!(config.api_url, "https://tasks.example.com");
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tb"));
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_invalid_timeout_is_ignored() {
        let config = ClientConfig::from_lookup(lookup(&[(REQUEST_TIMEOUT_VAR, "soon")]));
        assert_eq!(config.request_timeout, None);
    }
}
