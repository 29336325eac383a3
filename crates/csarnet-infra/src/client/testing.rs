//! Scripted transport for client unit tests.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use csarnet_core::ports::{HttpRequest, HttpResponse, HttpTransport, Method, TransportError};

use super::{ApiClient, ClientConfig};
use crate::store::InMemorySessionStore;

pub const BASE_URL: &str = "http://test.local/api";

type Scripted = Result<HttpResponse, TransportError>;

#[derive(Default)]
struct Inner {
    responses: Mutex<HashMap<(Method, String), VecDeque<Scripted>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

/// Replays queued responses per `(method, endpoint)` and records every
/// request. Unscripted calls get a 404.
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    inner: Arc<Inner>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, method: Method, endpoint: &str, response: HttpResponse) {
        self.enqueue(method, endpoint, Ok(response));
    }

    pub fn push_error(&self, method: Method, endpoint: &str, error: TransportError) {
        self.enqueue(method, endpoint, Err(error));
    }

    fn enqueue(&self, method: Method, endpoint: &str, scripted: Scripted) {
        self.inner
            .responses
            .lock()
            .unwrap()
            .entry((method, endpoint.to_string()))
            .or_default()
            .push_back(scripted);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.inner.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, endpoint: &str) -> Vec<HttpRequest> {
        let url = format!("{}{}", BASE_URL, endpoint);
        self.requests().into_iter().filter(|r| r.url == url).collect()
    }
}

#[async_trait]
impl HttpTransport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let endpoint = request
            .url
            .strip_prefix(BASE_URL)
            .unwrap_or(&request.url)
            .to_string();
        let key = (request.method.clone(), endpoint);

        self.inner.requests.lock().unwrap().push(request);

        self.inner
            .responses
            .lock()
            .unwrap()
            .get_mut(&key)
            .and_then(VecDeque::pop_front)
            .unwrap_or_else(|| Ok(HttpResponse::new(404, r#"{"detail":"Not found."}"#)))
    }
}

/// Client over `transport` with an in-memory store seeded from `entries`.
pub fn client_with(
    transport: &ScriptedTransport,
    entries: &[(&str, &str)],
) -> (ApiClient, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::with_entries(entries.iter().copied()));
    let client = ApiClient::new(
        ClientConfig::new(BASE_URL),
        Arc::new(transport.clone()),
        store.clone(),
    );
    (client, store)
}
