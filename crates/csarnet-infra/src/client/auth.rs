//! Login, registration, logout and the current-user lookup.

use chrono::{DateTime, NaiveDate, Utc};

use csarnet_core::domain::{AuthOutcome, LoginCredentials, Registration, TokenPair, User};
use csarnet_core::ports::{HttpResponse, Method};
use csarnet_core::validation::{validate_login, validate_registration};
use csarnet_core::{ClientError, ClientResult, ValidationError};
use csarnet_shared::ErrorBody;
use csarnet_shared::dto::{AuthTokens, RefreshRequest, TokenObtainRequest, UserBody};

use super::{ApiClient, ClientConfig, RequestOptions, decode, decode_value, ensure_success};

impl ApiClient {
    /// Sign in and persist the token pair.
    ///
    /// Backends that answer the login without tokens get a follow-up
    /// `POST /token/` with the same credentials.
    pub async fn login(&self, creds: &LoginCredentials) -> ClientResult<AuthOutcome> {
        validate_login(creds)?;

        let options = RequestOptions::json(Method::POST, creds)?;
        let response = self.request_public("/auth/login/", options).await?;
        let response = ensure_success(
            response,
            &["detail", "non_field_errors", "email", "password"],
            "Login failed",
        )?;

        let tokens = AuthTokens::from_value(&decode_value(&response)?);
        let pair = match (tokens.access, tokens.refresh) {
            (Some(access), Some(refresh)) => TokenPair { access, refresh },
            _ => {
                tracing::debug!("Login response carried no token pair; requesting one");
                self.obtain_token_pair(creds).await?
            }
        };

        self.tokens.store_pair(&pair).await?;
        tracing::info!(identifier = creds.identifier().unwrap_or_default(), "Logged in");

        let user = self.get_current_user().await?;
        Ok(AuthOutcome::Authenticated {
            user,
            tokens: Some(pair),
        })
    }

    /// Exchange credentials for a token pair at `POST /token/`.
    async fn obtain_token_pair(&self, creds: &LoginCredentials) -> ClientResult<TokenPair> {
        let email = creds
            .identifier()
            .ok_or(ValidationError::MissingIdentifier)?
            .to_string();

        let body = TokenObtainRequest {
            email,
            password: creds.password.clone(),
        };
        let response = self
            .request_public("/token/", RequestOptions::json(Method::POST, &body)?)
            .await?;

        if !response.is_success() {
            let message = ErrorBody::parse(&response.body)
                .message_or_raw(&["detail"])
                .unwrap_or_else(|| format!("Token request failed: HTTP {}", response.status));
            return Err(ClientError::api(response.status, message));
        }

        decode(&response)
    }

    /// Create an account.
    ///
    /// Returns [`AuthOutcome::VerificationRequired`] when the backend only
    /// acknowledges the registration with a `detail` message.
    pub async fn register(&self, registration: &Registration) -> ClientResult<AuthOutcome> {
        validate_registration(registration)?;

        let options = RequestOptions::json(Method::POST, registration)?;
        let response = self.request_public("/auth/registration/", options).await?;
        let response = ensure_success(
            response,
            &["email", "password1", "non_field_errors"],
            "Registration failed",
        )?;

        let tokens = AuthTokens::from_value(&decode_value(&response)?);
        if tokens.access.is_none() {
            if let Some(detail) = tokens.detail {
                tracing::info!(email = %registration.email, "Registration needs email verification");
                return Ok(AuthOutcome::VerificationRequired { detail });
            }
        }

        if let Some(access) = &tokens.access {
            self.tokens.set_access_token(access).await?;
        }
        if let Some(refresh) = &tokens.refresh {
            self.tokens.set_refresh_token(refresh).await?;
        }

        let user = self.get_current_user().await?;
        let tokens = match (tokens.access, tokens.refresh) {
            (Some(access), Some(refresh)) => Some(TokenPair { access, refresh }),
            _ => None,
        };
        tracing::info!(email = %user.email, "Registered");

        Ok(AuthOutcome::Authenticated { user, tokens })
    }

    /// Invalidate the refresh token server-side (best effort) and forget both
    /// tokens locally.
    pub async fn logout(&self) -> ClientResult<()> {
        if let Some(refresh) = self.tokens.refresh_token().await? {
            let options = RequestOptions::json(Method::POST, &RefreshRequest { refresh })?;
            match self.request_public("/auth/logout/", options).await {
                Ok(response) if !response.is_success() => {
                    tracing::warn!(status = response.status, "Logout rejected by backend");
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Logout request failed"),
            }
        }

        self.tokens.clear().await?;
        tracing::info!("Logged out");
        Ok(())
    }

    /// Fetch the signed-in user from `/users/me/`, falling back to
    /// `/auth/user/`.
    pub async fn get_current_user(&self) -> ClientResult<User> {
        let response = self.request("/users/me/", RequestOptions::get()).await?;
        if response.is_success() {
            return user_from_response(&response, &self.config);
        }

        let fallback = self.request("/auth/user/", RequestOptions::get()).await?;
        if fallback.is_success() {
            return user_from_response(&fallback, &self.config);
        }

        let detail = ErrorBody::parse(&response.body)
            .message_or_raw(&["detail", "error"])
            .unwrap_or_else(|| response.status_line());
        Err(ClientError::api(
            response.status,
            format!("Failed to get user info: {}", detail),
        ))
    }
}

pub(crate) fn user_from_response(response: &HttpResponse, config: &ClientConfig) -> ClientResult<User> {
    let body: UserBody = decode(response)?;
    user_from_body(body, config)
}

pub(crate) fn user_from_body(body: UserBody, config: &ClientConfig) -> ClientResult<User> {
    let id = body
        .id_string()
        .ok_or_else(|| ClientError::Decode("user record has no id".to_string()))?;

    let date_joined = body
        .date_joined
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|d| d.with_timezone(&Utc))
        .unwrap_or_else(Utc::now);

    let date_of_birth = body
        .date_of_birth
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok());

    Ok(User {
        id,
        email: body.email,
        first_name: body.first_name.unwrap_or_default(),
        last_name: body.last_name.unwrap_or_default(),
        date_joined,
        date_of_birth,
        avatar: body
            .avatar
            .filter(|a| !a.is_empty())
            .map(|a| config.media_url(&a)),
    })
}
