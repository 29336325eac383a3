//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::response::first_string;

/// Body for `POST /token/` (SimpleJWT pair exchange).
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenObtainRequest {
    pub email: String,
    pub password: String,
}

/// Body for `POST /token/refresh/` and `POST /auth/logout/`.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh: String,
}

/// Response of `POST /token/refresh/`. Rotating backends also send a new
/// refresh token.
#[derive(Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}

/// Tokens found in a login or registration response.
///
/// dj-rest-auth, SimpleJWT and hand-rolled views disagree on naming, so each
/// token is looked up under all three spellings.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthTokens {
    pub access: Option<String>,
    pub refresh: Option<String>,
    pub detail: Option<String>,
}

impl AuthTokens {
    const ACCESS_KEYS: [&'static str; 3] = ["access", "access_token", "accessToken"];
    const REFRESH_KEYS: [&'static str; 3] = ["refresh", "refresh_token", "refreshToken"];

    pub fn from_value(body: &Value) -> Self {
        Self {
            access: first_non_empty(body, &Self::ACCESS_KEYS),
            refresh: first_non_empty(body, &Self::REFRESH_KEYS),
            detail: first_string(body, &["detail"]),
        }
    }

    /// Both tokens present.
    pub fn is_complete(&self) -> bool {
        self.access.is_some() && self.refresh.is_some()
    }
}

/// First non-empty string under `keys`, in order.
pub fn first_non_empty(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|k| body.get(*k).and_then(Value::as_str))
        .find(|s| !s.is_empty())
        .map(str::to_string)
}

/// User as serialized by `/users/me/` or `/auth/user/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserBody {
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub pk: Option<Value>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub date_joined: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<String>,
    /// Usually a path relative to the backend origin, e.g. `/media/avatars/1.png`.
    #[serde(default)]
    pub avatar: Option<String>,
}

impl UserBody {
    /// `id`, falling back to `pk`, as a string.
    pub fn id_string(&self) -> Option<String> {
        [&self.id, &self.pk]
            .into_iter()
            .flatten()
            .find_map(|v| match v {
                Value::String(s) if !s.is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }
}

/// Response of `POST /predict/`.
#[derive(Clone, Serialize, Deserialize)]
pub struct ColorizeResponse {
    /// Base64-encoded PNG.
    pub colorized_image: String,
}

/// Response of `GET /health/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// Body for `POST /processing-jobs/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateJobRequest {
    pub image_id: String,
    pub job_type: String,
}

impl CreateJobRequest {
    pub fn colorization(image_id: impl Into<String>) -> Self {
        Self {
            image_id: image_id.into(),
            job_type: "colorization".to_string(),
        }
    }
}
