//! # C-SARNet Shared
//!
//! Request and response bodies as they appear on the wire.
//! The backend is a Django REST Framework service, so field names follow its
//! snake_case conventions and errors arrive as `detail` or per-field lists.

pub mod dto;
pub mod response;

pub use response::{ErrorBody, first_string};
