// File-backed implementation of the API key store: one small JSON document
// under the data directory, cached in memory and rewritten on every change.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::RwLock;

use crate::core::keys::{ApiKeyStore, KeyError};

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredKeys {
    groq_api_key: Option<String>,
}

pub struct JsonKeyStore {
    path: PathBuf,
    cache: RwLock<StoredKeys>,
}

impl JsonKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let cache = if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(content) => serde_json::from_str(&content).unwrap_or_else(|err| {
                    tracing::warn!("ignoring unreadable key file {}: {err}", path.display());
                    StoredKeys::default()
                }),
                Err(err) => {
                    tracing::warn!("ignoring unreadable key file {}: {err}", path.display());
                    StoredKeys::default()
                }
            }
        } else {
            StoredKeys::default()
        };

        Self {
            path,
            cache: RwLock::new(cache),
        }
    }

    async fn persist(&self) -> Result<(), KeyError> {
        let cache = self.cache.read().await;
        let content = serde_json::to_string_pretty(&*cache)
            .map_err(|e| KeyError::Storage(e.to_string()))?;
        tokio::fs::write(&self.path, content)
            .await
            .map_err(|e| KeyError::Storage(e.to_string()))
    }
}

#[async_trait]
impl ApiKeyStore for JsonKeyStore {
    async fn load(&self) -> Result<Option<String>, KeyError> {
        let cache = self.cache.read().await;
        Ok(cache.groq_api_key.clone())
    }

    async fn save(&self, key: &str) -> Result<(), KeyError> {
        {
            let mut cache = self.cache.write().await;
            cache.groq_api_key = Some(key.to_string());
        }
        self.persist().await
    }

    async fn clear(&self) -> Result<(), KeyError> {
        {
            let mut cache = self.cache.write().await;
            cache.groq_api_key = None;
        }
        self.persist().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn save_load_clear_roundtrip() {
        let tmp = NamedTempFile::new().unwrap();
        let path = tmp.path().to_owned();
        drop(tmp);

        let store = JsonKeyStore::new(path.clone());
        assert_eq!(store.load().await.unwrap(), None);

        store.save("gsk_live_123").await.unwrap();
        assert_eq!(
            store.load().await.unwrap(),
            Some("gsk_live_123".to_string())
        );

        // A fresh store must see the persisted value.
        let reopened = JsonKeyStore::new(path.clone());
        assert_eq!(
            reopened.load().await.unwrap(),
            Some("gsk_live_123".to_string())
        );

        reopened.clear().await.unwrap();
        assert_eq!(reopened.load().await.unwrap(), None);

        let reopened_again = JsonKeyStore::new(path);
        assert_eq!(reopened_again.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_file_degrades_to_empty() {
        let tmp = NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "not json at all").unwrap();

        let store = JsonKeyStore::new(tmp.path());
        assert_eq!(store.load().await.unwrap(), None);
    }
}
