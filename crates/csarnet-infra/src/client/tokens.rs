//! Typed access to the token pair kept in a [`SessionStore`].

use std::sync::Arc;

use csarnet_core::domain::TokenPair;
use csarnet_core::ports::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionStore, StoreError};

/// Reads and writes the access/refresh tokens. Holds no copy of its own;
/// every call goes to the underlying store.
#[derive(Clone)]
pub struct TokenStore {
    store: Arc<dyn SessionStore>,
}

impl TokenStore {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    pub async fn access_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(ACCESS_TOKEN_KEY).await
    }

    pub async fn refresh_token(&self) -> Result<Option<String>, StoreError> {
        self.store.get(REFRESH_TOKEN_KEY).await
    }

    pub async fn set_access_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(ACCESS_TOKEN_KEY, token).await
    }

    pub async fn set_refresh_token(&self, token: &str) -> Result<(), StoreError> {
        self.store.set(REFRESH_TOKEN_KEY, token).await
    }

    pub async fn store_pair(&self, pair: &TokenPair) -> Result<(), StoreError> {
        self.set_access_token(&pair.access).await?;
        self.set_refresh_token(&pair.refresh).await
    }

    /// Remove both tokens. Both removals are attempted even if the first fails.
    pub async fn clear(&self) -> Result<(), StoreError> {
        let access = self.store.remove(ACCESS_TOKEN_KEY).await;
        let refresh = self.store.remove(REFRESH_TOKEN_KEY).await;
        access.and(refresh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySessionStore;

    #[tokio::test]
    async fn test_store_pair_and_clear() {
        let store = Arc::new(InMemorySessionStore::new());
        let tokens = TokenStore::new(store.clone());

        tokens
            .store_pair(&TokenPair {
                access: "A1".to_string(),
                refresh: "R1".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(
            store.get("access_token").await.unwrap().as_deref(),
            Some("A1")
        );
        assert_eq!(tokens.refresh_token().await.unwrap().as_deref(), Some("R1"));

        tokens.clear().await.unwrap();
        assert_eq!(tokens.access_token().await.unwrap(), None);
        assert_eq!(tokens.refresh_token().await.unwrap(), None);
    }
}
