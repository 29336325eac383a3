//! Authenticated API client.
//!
//! Every authenticated call goes through [`ApiClient::request`], which runs
//! a small, explicit flow:
//!
//! ```text
//! Send ──(not 401, or no token attached)──────────────────────────▶ Return
//!   │
//!   └─401─▶ RefreshOnce ──refreshed / already refreshed──▶ Resend ─▶ Return
//!               │
//!               ├─no refresh token──▶ Return original 401
//!               └─refresh rejected──▶ clear tokens, SessionExpired
//! ```
//!
//! Refreshes are single-flight: concurrent 401s queue on one guard, and the
//! callers that arrive after a successful refresh reuse the new token.

mod account;
mod auth;
mod config;
mod imaging;
mod tokens;

#[cfg(test)]
mod testing;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::Instrument;
use uuid::Uuid;

use csarnet_core::ports::{
    FormPart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, SessionStore,
};
use csarnet_core::{ClientError, ClientResult};
use csarnet_shared::ErrorBody;
use csarnet_shared::dto::{RefreshRequest, RefreshResponse};

pub use config::ClientConfig;
pub use tokens::TokenStore;

/// Header carrying a per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

const REFRESH_ENDPOINT: &str = "/token/refresh/";

/// Method, extra headers and body of a call; the URL comes from the endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: RequestBody,
}

impl RequestOptions {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// `method` with a JSON body.
    pub fn json<T: Serialize>(method: Method, body: &T) -> ClientResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ClientError::Decode(format!("cannot encode request body: {}", e)))?;
        Ok(Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Json(value),
        })
    }

    pub fn multipart(method: Method, parts: Vec<FormPart>) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: RequestBody::Multipart(parts),
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Where a 401 left us after taking the refresh guard.
enum RefreshOutcome {
    /// We refreshed; resend with this token.
    Refreshed(String),
    /// Another call refreshed while we waited; resend with its token.
    Reused(String),
    /// Nothing to refresh with; hand back the original 401.
    Unavailable,
}

/// Client for the C-SARNet REST API.
///
/// Share it behind an `Arc`; all methods take `&self`.
pub struct ApiClient {
    config: ClientConfig,
    transport: Arc<dyn HttpTransport>,
    tokens: TokenStore,
    refresh_guard: Mutex<()>,
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        transport: Arc<dyn HttpTransport>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            config,
            transport,
            tokens: TokenStore::new(store),
            refresh_guard: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tokens(&self) -> &TokenStore {
        &self.tokens
    }

    /// Whether an access token is currently stored.
    pub async fn is_authenticated(&self) -> ClientResult<bool> {
        Ok(self.tokens.access_token().await?.is_some())
    }

    /// Issue an authenticated call.
    ///
    /// Returns the response for any status except a 401 that could be
    /// recovered from; status handling is up to the caller.
    pub async fn request(&self, endpoint: &str, options: RequestOptions) -> ClientResult<HttpResponse> {
        let request_id = Uuid::new_v4();
        let span = tracing::debug_span!(
            "api_request",
            method = %options.method,
            endpoint,
            request_id = %request_id,
        );

        self.send_with_refresh(endpoint, options, request_id)
            .instrument(span)
            .await
    }

    async fn send_with_refresh(
        &self,
        endpoint: &str,
        options: RequestOptions,
        request_id: Uuid,
    ) -> ClientResult<HttpResponse> {
        let token = self.tokens.access_token().await?;
        let mut request = self.build_request(endpoint, options, token.as_deref());
        request.set_header(REQUEST_ID_HEADER, request_id.to_string());

        let response = self.send(request.clone()).await?;

        let sent = match token {
            Some(sent) if response.status == 401 => sent,
            _ => return Ok(response),
        };

        match self.refresh_after_unauthorized(&sent).await? {
            RefreshOutcome::Refreshed(token) | RefreshOutcome::Reused(token) => {
                request.set_header("Authorization", bearer(&token));
                tracing::debug!("Resending request with refreshed token");
                self.send(request).await
            }
            RefreshOutcome::Unavailable => Ok(response),
        }
    }

    /// Issue a call without credentials or refresh handling (login, health).
    pub(crate) async fn request_public(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> ClientResult<HttpResponse> {
        let mut request = self.build_request(endpoint, options, None);
        request.set_header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        self.send(request).await
    }

    fn build_request(&self, endpoint: &str, options: RequestOptions, token: Option<&str>) -> HttpRequest {
        let mut request = HttpRequest::new(options.method, self.config.url(endpoint));

        if !options.body.is_multipart() {
            request.set_header("Content-Type", "application/json");
        }
        request.set_header("Accept", "application/json");
        for (name, value) in options.headers {
            request.set_header(&name, value);
        }
        if let Some(token) = token {
            request.set_header("Authorization", bearer(token));
        }

        request.body = options.body;
        request
    }

    async fn send(&self, request: HttpRequest) -> ClientResult<HttpResponse> {
        let method = request.method.clone();
        let url = request.url.clone();

        match self.transport.send(request).await {
            Ok(response) => {
                tracing::debug!(%method, %url, status = response.status, "Response received");
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(%method, %url, error = %e, "Request failed");
                Err(e.into())
            }
        }
    }

    /// Single-flight refresh after `sent` was rejected with a 401.
    async fn refresh_after_unauthorized(&self, sent: &str) -> ClientResult<RefreshOutcome> {
        let _guard = self.refresh_guard.lock().await;

        if let Some(current) = self.tokens.access_token().await? {
            if current != sent {
                tracing::debug!("Access token already refreshed by a concurrent call");
                return Ok(RefreshOutcome::Reused(current));
            }
        }

        let Some(refresh) = self.tokens.refresh_token().await? else {
            tracing::debug!("No refresh token stored; returning 401 to caller");
            return Ok(RefreshOutcome::Unavailable);
        };

        match self.exchange_refresh_token(&refresh).await {
            Some(refreshed) => {
                self.tokens.set_access_token(&refreshed.access).await?;
                if let Some(rotated) = &refreshed.refresh {
                    self.tokens.set_refresh_token(rotated).await?;
                }
                tracing::info!("Access token refreshed");
                Ok(RefreshOutcome::Refreshed(refreshed.access))
            }
            None => {
                if let Err(e) = self.tokens.clear().await {
                    tracing::warn!(error = %e, "Failed to clear tokens after rejected refresh");
                }
                Err(ClientError::SessionExpired)
            }
        }
    }

    /// POST the refresh token; `None` on any failure.
    async fn exchange_refresh_token(&self, refresh: &str) -> Option<RefreshResponse> {
        let options = RequestOptions::json(
            Method::POST,
            &RefreshRequest {
                refresh: refresh.to_string(),
            },
        )
        .ok()?;

        let response = match self.request_public(REFRESH_ENDPOINT, options).await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh request failed");
                return None;
            }
        };

        if !response.is_success() {
            tracing::warn!(status = response.status, "Token refresh rejected");
            return None;
        }

        match response.json::<RefreshResponse>() {
            Ok(refreshed) if !refreshed.access.is_empty() => Some(refreshed),
            Ok(_) => {
                tracing::warn!("Token refresh returned an empty access token");
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh returned an unreadable body");
                None
            }
        }
    }
}

fn bearer(token: &str) -> String {
    format!("Bearer {}", token)
}

/// Pass successful responses through; turn the rest into [`ClientError::Api`]
/// with a message taken from the body under `keys`, or `fallback`.
pub(crate) fn ensure_success(
    response: HttpResponse,
    keys: &[&str],
    fallback: &str,
) -> ClientResult<HttpResponse> {
    if response.is_success() {
        return Ok(response);
    }
    let message = ErrorBody::parse(&response.body).message_or(keys, fallback);
    Err(ClientError::api(response.status, message))
}

pub(crate) fn decode<T: DeserializeOwned>(response: &HttpResponse) -> ClientResult<T> {
    response
        .json()
        .map_err(|e| ClientError::Decode(e.to_string()))
}

pub(crate) fn decode_value(response: &HttpResponse) -> ClientResult<serde_json::Value> {
    response
        .json_value()
        .ok_or_else(|| ClientError::Decode("response body is not JSON".to_string()))
}
