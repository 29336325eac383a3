use serde::{Deserialize, Serialize};

use super::User;

/// Access/refresh token pair.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

// Tokens stay out of logs and debug output.
impl std::fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenPair")
            .field("access", &"<redacted>")
            .field("refresh", &"<redacted>")
            .finish()
    }
}

/// Result of a login or registration.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthOutcome {
    /// Signed in. `tokens` is `None` when the backend issued none and the
    /// session rides on cookies alone.
    Authenticated {
        user: User,
        tokens: Option<TokenPair>,
    },
    /// Registration accepted, but the email address must be confirmed first.
    VerificationRequired { detail: String },
}

impl AuthOutcome {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthOutcome::Authenticated { user, .. } => Some(user),
            AuthOutcome::VerificationRequired { .. } => None,
        }
    }
}
