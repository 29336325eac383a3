//! Client-level error types.

use thiserror::Error;

use crate::ports::{StoreError, TransportError};

/// Errors surfaced to callers of the API client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Transport(#[from] TransportError),

    /// The backend answered with an error status.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// The refresh token was rejected; the user must log in again.
    #[error("Session expired. Please login again.")]
    SessionExpired,

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Invalid response: {0}")]
    Decode(String),

    #[error("Session storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("Job {job_id} did not finish after {polls} polls")]
    JobTimeout { job_id: String, polls: u32 },
}

impl ClientError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether the caller has to re-authenticate before trying again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            ClientError::SessionExpired | ClientError::Api { status: 401, .. }
        )
    }
}

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please upload a PNG, JPEG, or TIFF file")]
    UnsupportedType(String),

    #[error("File size must be less than {limit}")]
    TooLarge { size: usize, limit: &'static str },

    #[error("File is empty")]
    EmptyFile,

    #[error("Please fill in all fields")]
    MissingCredentials,

    #[error("Please fill in all required fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Email/username missing for token retrieval")]
    MissingIdentifier,
}

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requires_login() {
        assert!(ClientError::SessionExpired.requires_login());
        assert!(ClientError::api(401, "nope").requires_login());
        assert!(!ClientError::api(500, "boom").requires_login());
        assert!(!ClientError::Validation(ValidationError::EmptyFile).requires_login());
    }

    #[test]
    fn test_messages_match_user_facing_text() {
        assert_eq!(
            ClientError::SessionExpired.to_string(),
            "Session expired. Please login again."
        );
        let err = ValidationError::TooLarge {
            size: 1,
            limit: "50MB",
        };
        assert_eq!(err.to_string(), "File size must be less than 50MB");
    }
}
