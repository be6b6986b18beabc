// Completion API key handling. The key belongs to the user and lives in
// persistent extension-style storage; this service owns the trim/save/remove
// semantics, the store port owns the bytes.

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum KeyError {
    #[error("key storage error: {0}")]
    Storage(String),
}

/// Persistent key-value slot for the completion API key.
#[async_trait]
pub trait ApiKeyStore: Send + Sync {
    async fn load(&self) -> Result<Option<String>, KeyError>;
    async fn save(&self, key: &str) -> Result<(), KeyError>;
    async fn clear(&self) -> Result<(), KeyError>;
}

/// What a save action did, for user feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeySaveOutcome {
    Saved(String),
    Removed,
}

pub struct KeyService<S: ApiKeyStore> {
    store: S,
}

impl<S: ApiKeyStore> KeyService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the stored key at popup open. Storage failures degrade to "no
    /// key" so opening never fails; the user just has to save again.
    pub async fn load_key(&self) -> Option<String> {
        match self.store.load().await {
            Ok(key) => key,
            Err(err) => {
                tracing::warn!("failed to load stored API key: {err}");
                None
            }
        }
    }

    /// Trim and persist. An empty trimmed value removes the stored key.
    pub async fn save_key(&self, raw: &str) -> Result<KeySaveOutcome, KeyError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            self.store.clear().await?;
            Ok(KeySaveOutcome::Removed)
        } else {
            self.store.save(trimmed).await?;
            Ok(KeySaveOutcome::Saved(trimmed.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemoryStore {
        key: Mutex<Option<String>>,
    }

    #[async_trait]
    impl ApiKeyStore for MemoryStore {
        async fn load(&self) -> Result<Option<String>, KeyError> {
            Ok(self.key.lock().unwrap().clone())
        }

        async fn save(&self, key: &str) -> Result<(), KeyError> {
            *self.key.lock().unwrap() = Some(key.to_string());
            Ok(())
        }

        async fn clear(&self) -> Result<(), KeyError> {
            *self.key.lock().unwrap() = None;
            Ok(())
        }
    }

    #[tokio::test]
    async fn save_trims_whitespace() {
        let service = KeyService::new(MemoryStore::default());

        let outcome = service.save_key("  gsk_abc  ").await.unwrap();

        assert_eq!(outcome, KeySaveOutcome::Saved("gsk_abc".to_string()));
        assert_eq!(service.load_key().await, Some("gsk_abc".to_string()));
    }

    #[tokio::test]
    async fn saving_whitespace_removes_the_key() {
        let service = KeyService::new(MemoryStore::default());
        service.save_key("gsk_abc").await.unwrap();

        let outcome = service.save_key("   ").await.unwrap();

        assert_eq!(outcome, KeySaveOutcome::Removed);
        assert_eq!(service.load_key().await, None);
    }
}
