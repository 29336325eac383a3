//! Profile, avatar and usage endpoints.

use serde_json::Value;

use csarnet_core::domain::{
    ImageKind, ImageUpload, ProfileUpdate, UploadHistoryEntry, User, UserStats,
};
use csarnet_core::ports::{FormPart, Method};
use csarnet_core::validation::validate_image;
use csarnet_core::ClientResult;
use csarnet_shared::dto::first_non_empty;

use super::auth::user_from_response;
use super::{ApiClient, RequestOptions, decode, decode_value, ensure_success};

const ERROR_KEYS: &[&str] = &["detail", "error"];

impl ApiClient {
    /// `PATCH /users/me/` with only the fields set in `update`.
    pub async fn update_user(&self, update: &ProfileUpdate) -> ClientResult<User> {
        let response = self
            .request("/users/me/", RequestOptions::json(Method::PATCH, update)?)
            .await?;
        let response = ensure_success(response, ERROR_KEYS, "Failed to update profile")?;

        let user = user_from_response(&response, &self.config)?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    /// Upload a new avatar and return its absolute URL, if the backend
    /// reports one.
    pub async fn update_avatar(&self, upload: &ImageUpload) -> ClientResult<Option<String>> {
        validate_image(upload, ImageKind::Avatar)?;

        let part = FormPart::file(
            ImageKind::Avatar.form_field(),
            upload.file_name.as_str(),
            upload.mime_type.as_str(),
            upload.bytes.clone(),
        );
        let response = self
            .request(
                "/users/avatar/",
                RequestOptions::multipart(Method::POST, vec![part]),
            )
            .await?;
        let response = ensure_success(response, ERROR_KEYS, "Failed to update avatar")?;

        let body = decode_value(&response)?;
        Ok(first_non_empty(&body, &["avatar_url", "avatar"]).map(|a| self.config.media_url(&a)))
    }

    /// Raw `/sessions/` listing.
    pub async fn sessions(&self) -> ClientResult<Value> {
        let response = self.request("/sessions/", RequestOptions::get()).await?;
        let response = ensure_success(response, &[], "Failed to get sessions")?;
        decode_value(&response)
    }

    /// Raw `/images/` listing.
    pub async fn images(&self) -> ClientResult<Value> {
        let response = self.request("/images/", RequestOptions::get()).await?;
        let response = ensure_success(response, &[], "Failed to get images")?;
        decode_value(&response)
    }

    /// Counts derived from the session and image listings.
    ///
    /// Never fails: if any of the three lookups is unavailable the result is
    /// [`UserStats::empty`].
    pub async fn user_stats(&self) -> UserStats {
        match futures::try_join!(self.get_current_user(), self.sessions(), self.images()) {
            Ok((user, sessions, images)) => UserStats {
                images_processed: count_items(&images),
                total_sessions: count_items(&sessions),
                member_since: user.date_joined,
            },
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load user statistics");
                UserStats::empty()
            }
        }
    }

    pub async fn upload_history(&self) -> ClientResult<Vec<UploadHistoryEntry>> {
        let response = self.request("/users/me/uploads/", RequestOptions::get()).await?;
        let response = ensure_success(response, ERROR_KEYS, "Failed to fetch upload history")?;
        decode(&response)
    }
}

/// Length of a listing; anything but an array counts as empty.
fn count_items(listing: &Value) -> usize {
    listing.as_array().map_or(0, Vec::len)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::super::testing::{ScriptedTransport, client_with};
    use super::*;
    use csarnet_core::{ClientError, ValidationError};
    use csarnet_core::domain::UploadStatus;
    use csarnet_core::ports::{HttpResponse, RequestBody};

    #[tokio::test]
    async fn test_update_user_sends_only_set_fields() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::PATCH,
            "/users/me/",
            HttpResponse::json_body(
                200,
                &json!({"id": "u1", "email": "a@b.com", "first_name": "Grace", "date_of_birth": "1990-01-02"}),
            ),
        );
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);

        let user = client
            .update_user(&ProfileUpdate {
                first_name: Some("Grace".to_string()),
                date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 2),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(user.first_name, "Grace");
        let sent = transport.requests();
        assert_eq!(
            sent[0].body,
            RequestBody::Json(json!({"first_name": "Grace", "date_of_birth": "1990-01-02"}))
        );
    }

    #[tokio::test]
    async fn test_update_user_error_detail() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::PATCH,
            "/users/me/",
            HttpResponse::json_body(400, &json!({"detail": "Email taken"})),
        );
        transport.push(Method::PATCH, "/users/me/", HttpResponse::new(500, ""));
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);
        let update = ProfileUpdate {
            email: Some("c@d.com".to_string()),
            ..Default::default()
        };

        let err = client.update_user(&update).await.unwrap_err();
        assert_eq!(err.to_string(), "Email taken");

        let err = client.update_user(&update).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to update profile");
    }

    #[tokio::test]
    async fn test_update_avatar_is_multipart_and_resolves_url() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::POST,
            "/users/avatar/",
            HttpResponse::json_body(200, &json!({"avatar_url": "/media/avatars/u1.png"})),
        );
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);

        let url = client
            .update_avatar(&ImageUpload::new("me.png", "image/png", vec![1, 2, 3]))
            .await
            .unwrap();

        assert_eq!(url.as_deref(), Some("http://test.local/media/avatars/u1.png"));
        let sent = &transport.requests()[0];
        assert_eq!(sent.header("Content-Type"), None);
        match &sent.body {
            RequestBody::Multipart(parts) => {
                assert_eq!(parts.len(), 1);
                assert_eq!(parts[0].name, "avatar");
                assert_eq!(parts[0].file_name.as_deref(), Some("me.png"));
            }
            other => panic!("expected multipart body, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_oversized_avatar_rejected_before_network() {
        let transport = ScriptedTransport::new();
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);
        let upload = ImageUpload::new("me.png", "image/png", vec![0; ImageKind::Avatar.max_bytes() + 1]);

        let err = client.update_avatar(&upload).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::TooLarge { limit: "5MB", .. })
        ));
        assert_eq!(err.to_string(), "File size must be less than 5MB");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_user_stats_counts_listings() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::GET,
            "/users/me/",
            HttpResponse::json_body(
                200,
                &json!({"id": 1, "email": "a@b.com", "date_joined": "2023-06-01T08:30:00Z"}),
            ),
        );
        transport.push(
            Method::GET,
            "/sessions/",
            HttpResponse::json_body(200, &json!([{"id": 1}, {"id": 2}])),
        );
        transport.push(
            Method::GET,
            "/images/",
            HttpResponse::json_body(200, &json!([{"id": 1}, {"id": 2}, {"id": 3}])),
        );
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);

        let stats = client.user_stats().await;

        assert_eq!(stats.total_sessions, 2);
        assert_eq!(stats.images_processed, 3);
        assert_eq!(stats.member_since.to_rfc3339(), "2023-06-01T08:30:00+00:00");
    }

    #[tokio::test]
    async fn test_user_stats_empty_on_failure() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::GET,
            "/users/me/",
            HttpResponse::json_body(200, &json!({"id": 1, "email": "a@b.com"})),
        );
        transport.push(
            Method::GET,
            "/sessions/",
            HttpResponse::json_body(200, &json!([{"id": 1}])),
        );
        transport.push(Method::GET, "/images/", HttpResponse::new(500, ""));
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);

        let stats = client.user_stats().await;

        assert_eq!(stats.total_sessions, 0);
        assert_eq!(stats.images_processed, 0);
    }

    #[tokio::test]
    async fn test_listing_errors_use_fixed_messages() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::GET,
            "/sessions/",
            HttpResponse::json_body(403, &json!({"detail": "nope"})),
        );
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);

        let err = client.sessions().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get sessions");

        // Unscripted: the scripted transport answers 404.
        let err = client.images().await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to get images");
    }

    #[tokio::test]
    async fn test_upload_history() {
        let transport = ScriptedTransport::new();
        transport.push(
            Method::GET,
            "/users/me/uploads/",
            HttpResponse::json_body(
                200,
                &json!([{
                    "id": 3,
                    "fileName": "scene.tif",
                    "uploadDate": "2024-05-01",
                    "status": "completed",
                    "fileSize": "12 MB",
                    "downloadUrl": "/media/out/3.png"
                }]),
            ),
        );
        let (client, _) = client_with(&transport, &[("access_token", "A1")]);

        let history = client.upload_history().await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].id, "3");
        assert_eq!(history[0].status, UploadStatus::Completed);
    }

    #[test]
    fn test_count_items_shapes() {
        assert_eq!(count_items(&json!([1, 2])), 2);
        assert_eq!(count_items(&json!({"results": [1]})), 0);
        assert_eq!(count_items(&json!(null)), 0);
    }
}
