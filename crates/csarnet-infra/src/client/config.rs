//! API client configuration.

/// Where the backend lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// API root, e.g. `http://localhost:8000/api`. Never ends with `/`.
    pub base_url: String,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Default API root for a host: `http://<host>:8000/api`.
    pub fn for_host(host: &str) -> Self {
        Self::new(format!("http://{}:8000/api", host))
    }

    /// Load configuration from environment variables.
    ///
    /// `CSARNET_API_URL` wins; otherwise the API is assumed on port 8000 of
    /// `CSARNET_HOST` (default `localhost`).
    pub fn from_env() -> Self {
        match std::env::var("CSARNET_API_URL") {
            Ok(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => {
                let host =
                    std::env::var("CSARNET_HOST").unwrap_or_else(|_| "localhost".to_string());
                Self::for_host(&host)
            }
        }
    }

    /// Full URL for an endpoint such as `/users/me/`.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Origin that serves media files: the base URL with its first `api`
    /// path segment removed. The host is never touched.
    pub fn media_origin(&self) -> String {
        let authority_start = self.base_url.find("://").map_or(0, |i| i + 3);
        let Some(path_start) = self.base_url[authority_start..]
            .find('/')
            .map(|i| authority_start + i)
        else {
            return self.base_url.clone();
        };

        let (origin, path) = self.base_url.split_at(path_start);
        let mut segments: Vec<&str> = path.split('/').collect();
        if let Some(pos) = segments.iter().position(|s| *s == "api") {
            segments.remove(pos);
        }
        format!("{}{}", origin, segments.join("/"))
    }

    /// Absolute URL for a media path; absolute URLs pass through.
    pub fn media_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        format!("{}{}", self.media_origin(), path)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_host("localhost")
    }
}
