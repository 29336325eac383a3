//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod session_store;
mod transport;

pub use session_store::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, SessionStore, StoreError};
pub use transport::{
    FormPart, HttpRequest, HttpResponse, HttpTransport, Method, RequestBody, TransportError,
};
