//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use csarnet_infra::{ClientConfig, ReqwestConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub client: ClientConfig,
    pub transport: ReqwestConfig,
    /// Where the token pair is persisted between invocations.
    pub session_file: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            client: ClientConfig::from_env(),
            transport: ReqwestConfig::from_env(),
            session_file: env::var_os("CSARNET_SESSION_FILE")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_session_file),
        }
    }
}

/// `$HOME/.csarnet/session.json`, or `./.csarnet/session.json` without a home.
fn default_session_file() -> PathBuf {
    env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".csarnet")
        .join("session.json")
}
