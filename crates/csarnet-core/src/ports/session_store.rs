use async_trait::async_trait;

/// Storage key holding the current access token.
pub const ACCESS_TOKEN_KEY: &str = "access_token";

/// Storage key holding the current refresh token.
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Persistent key-value storage for session credentials (in-memory, file).
///
/// Writers do not coordinate; the last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Get a value from the store.
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Session storage errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O failed: {0}")]
    Io(String),

    #[error("Serialization failed: {0}")]
    Serialization(String),
}
