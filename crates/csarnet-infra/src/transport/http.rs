//! reqwest-backed transport.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};

use csarnet_core::ports::{
    FormPart, HttpRequest, HttpResponse, HttpTransport, RequestBody, TransportError,
};

/// reqwest transport configuration.
#[derive(Debug, Clone)]
pub struct ReqwestConfig {
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Default for ReqwestConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: concat!("csarnet/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ReqwestConfig {
    pub fn from_env() -> Self {
        Self {
            timeout: std::env::var("CSARNET_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs),
            ..Self::default()
        }
    }
}

/// Transport over a shared `reqwest::Client` with a cookie jar, so session
/// cookies set by the backend ride along on later calls.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ReqwestConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;

        Ok(Self { client })
    }

    fn form(parts: Vec<FormPart>) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for part in parts {
            let mut p = Part::bytes(part.data);
            if let Some(file_name) = part.file_name {
                p = p.file_name(file_name);
            }
            if let Some(mime) = part.mime_type {
                p = p
                    .mime_str(&mime)
                    .map_err(|e| TransportError::InvalidRequest(e.to_string()))?;
            }
            form = form.part(part.name, p);
        }
        Ok(form)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self
            .client
            .request(request.method, &request.url);

        let multipart = request.body.is_multipart();
        for (name, value) in &request.headers {
            // reqwest writes the boundary-carrying content type itself
            if multipart && name.eq_ignore_ascii_case("content-type") {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.body(value.to_string()),
            RequestBody::Multipart(parts) => builder.multipart(Self::form(parts)?),
        };

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::Connection(e.to_string())
            }
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
            .collect();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpResponse {
            status: status.as_u16(),
            reason: status.canonical_reason().map(str::to_string),
            headers,
            body: body.to_vec(),
        })
    }
}
