//! Error bodies returned by the backend.
//!
//! DRF reports failures as `{"detail": "..."}`, as per-field lists such as
//! `{"email": ["already taken"]}`, or, in a few custom views, as
//! `{"error": "..."}`.

use serde_json::Value;

/// First string found under `keys`, in order.
///
/// A key holding a list contributes its first string element.
pub fn first_string(body: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match body.get(*key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) => items
            .iter()
            .find_map(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_string),
        _ => None,
    })
}

/// A parsed (or unparsable) error response body.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorBody {
    json: Option<Value>,
}

impl ErrorBody {
    /// Parse raw bytes; anything that is not JSON is kept as "no body".
    pub fn parse(bytes: &[u8]) -> Self {
        Self {
            json: serde_json::from_slice(bytes).ok(),
        }
    }

    pub fn from_value(value: Value) -> Self {
        Self { json: Some(value) }
    }

    pub fn is_json(&self) -> bool {
        self.json.is_some()
    }

    /// Message under the first matching key, or `fallback`.
    pub fn message_or(&self, keys: &[&str], fallback: impl Into<String>) -> String {
        self.message(keys).unwrap_or_else(|| fallback.into())
    }

    pub fn message(&self, keys: &[&str]) -> Option<String> {
        self.json.as_ref().and_then(|v| first_string(v, keys))
    }

    /// Message under `keys`, else the whole JSON body, else `None`.
    pub fn message_or_raw(&self, keys: &[&str]) -> Option<String> {
        self.message(keys)
            .or_else(|| self.json.as_ref().map(Value::to_string))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_string_order_and_lists() {
        let body = json!({
            "non_field_errors": ["Unable to log in with provided credentials."],
            "email": ["Enter a valid email address."]
        });

        assert_eq!(
            first_string(&body, &["detail", "non_field_errors", "email"]).as_deref(),
            Some("Unable to log in with provided credentials.")
        );
        assert_eq!(
            first_string(&body, &["email"]).as_deref(),
            Some("Enter a valid email address.")
        );
        assert_eq!(first_string(&body, &["password"]), None);
    }

    #[test]
    fn test_error_body_fallbacks() {
        let html = ErrorBody::parse(b"<h1>Server Error</h1>");
        assert!(!html.is_json());
        assert_eq!(html.message_or(&["detail"], "Login failed"), "Login failed");
        assert_eq!(html.message_or_raw(&["detail"]), None);

        let raw = ErrorBody::parse(br#"{"code":"x"}"#);
        assert_eq!(raw.message_or_raw(&["detail"]).as_deref(), Some(r#"{"code":"x"}"#));
    }
}
