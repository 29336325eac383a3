//! # C-SARNet Core
//!
//! The domain layer of the C-SARNet client.
//! This crate holds the entities, the ports the client talks through, and the
//! checks that run before anything touches the network. It has no
//! infrastructure dependencies.

pub mod assistant;
pub mod domain;
pub mod error;
pub mod ports;
pub mod validation;

pub use error::{ClientError, ClientResult, ValidationError};
