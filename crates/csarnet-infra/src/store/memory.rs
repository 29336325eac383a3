//! In-memory session store - used by tests and short-lived embeddings.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use csarnet_core::ports::{SessionStore, StoreError};

/// In-memory session store using a HashMap behind an async RwLock.
///
/// Note: Tokens are lost when the process exits.
pub struct InMemorySessionStore {
    store: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            store: RwLock::new(HashMap::new()),
        }
    }

    /// Store pre-seeded with the given entries.
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            store: RwLock::new(map),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let store = self.store.read().await;
        Ok(store.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut store = self.store.write().await;
        store.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemorySessionStore::new();
        store.set("access_token", "A1").await.unwrap();
        assert_eq!(
            store.get("access_token").await.unwrap(),
            Some("A1".to_string())
        );
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = InMemorySessionStore::with_entries([("access_token", "A1")]);
        store.set("access_token", "A2").await.unwrap();
        assert_eq!(
            store.get("access_token").await.unwrap(),
            Some("A2".to_string())
        );
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::with_entries([("refresh_token", "R1")]);
        store.remove("refresh_token").await.unwrap();
        store.remove("refresh_token").await.unwrap();
        assert_eq!(store.get("refresh_token").await.unwrap(), None);
    }
}
