//! # C-SARNet Infrastructure
//!
//! Concrete implementations of the ports defined in `csarnet-core`, plus the
//! authenticated [`ApiClient`] built on top of them.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No network stack; in-memory and file stores only
//! - `http` - `reqwest`-backed [`HttpTransport`](csarnet_core::ports::HttpTransport)

pub mod client;
pub mod store;
pub mod transport;

pub use client::{ApiClient, ClientConfig, REQUEST_ID_HEADER, RequestOptions, TokenStore};
pub use store::{FileSessionStore, InMemorySessionStore};

#[cfg(feature = "http")]
pub use transport::{ReqwestConfig, ReqwestTransport};
