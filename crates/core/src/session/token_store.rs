//! Persistent key/value storage for client-side secrets

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::{Error, Result};

#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>>;

    async fn set(&self, key: &str, value: &str) -> Result<()>;

    async fn remove(&self, key: &str) -> Result<()>;
}

/// JSON-object file store
pub struct FileTokenStore {
    path: PathBuf,
    cache: RwLock<HashMap<String, String>>,
}

impl FileTokenStore {
    /// Open the store; a missing file is treated as empty
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let cache = if path.exists() {
            let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
                Error::Storage(format!("Failed to read session file: {}", e))
            })?;
            serde_json::from_str(&content).map_err(|e| {
                Error::Storage(format!("Failed to parse session file: {}", e))
            })?
        } else {
            HashMap::new()
        };

        Ok(Self {
            path,
            cache: RwLock::new(cache),
        })
    }

    async fn persist(&self, entries: &HashMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(entries)?;

        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                Error::Storage(format!("Failed to create directory: {}", e))
            })?;
        }

        tokio::fs::write(&self.path, content).await.map_err(|e| {
            Error::Storage(format!("Failed to write session file: {}", e))
        })?;
        Ok(())
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cache.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        cache.insert(key.to_string(), value.to_string());
        self.persist(&cache).await
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let mut cache = self.cache.write().await;
        if cache.remove(key).is_some() {
            self.persist(&cache).await?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
