//! API route configuration.

use crate::constants::{DEFAULT_API_BASE_URL, REQUEST_TIMEOUT_MS};

/// Base URL + per-request deadline for the shared HTTP client. Constructed
/// once at startup and injected into the resource clients; nothing reads it
/// ambiently.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    base_url: String,
    timeout_ms: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_url(DEFAULT_API_BASE_URL)
    }
}

impl ApiConfig {
    /// Build from the `API_BASE_URL` compile-time environment variable,
    /// falling back to the local development backend.
    pub fn from_env() -> Self {
        match option_env!("API_BASE_URL") {
            Some(url) => Self::from_url(url),
            None => Self::default(),
        }
    }

    pub fn from_url(url: &str) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            timeout_ms: REQUEST_TIMEOUT_MS,
        }
    }

    pub fn with_timeout(mut self, timeout_ms: u32) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout_ms(&self) -> u32 {
        self.timeout_ms
    }

    /// Full URL for an API path. Paths keep the backend's trailing-slash
    /// convention, e.g. `/agents/` or `/auth/login/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let config = ApiConfig::from_url("https://api.example.com/");
        assert_eq!(config.base_url(), "https://api.example.com");
        assert_eq!(config.url("/agents/"), "https://api.example.com/api/agents/");
    }

    #[test]
    fn default_points_at_local_backend() {
        let config = ApiConfig::default();
        assert_eq!(config.url("/monitoring/health/"), format!("{}/api/monitoring/health/", crate::constants::DEFAULT_API_BASE_URL));
        assert_eq!(config.timeout_ms(), crate::constants::REQUEST_TIMEOUT_MS);
    }
}
