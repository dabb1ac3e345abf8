//! Harness configuration

use std::time::Duration;

/// Configuration for a test context
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Base URL of the platform API, `/api` prefix included
    pub api_url: String,

    /// Per-request timeout applied to every API call
    pub request_timeout: Duration,
}

impl HarnessConfig {
    /// Read configuration from the environment.
    ///
    /// `API_URL` overrides the base URL; everything else keeps its default.
    pub fn from_env() -> Self {
        let api_url = std::env::var("API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api".to_string());
        Self {
            api_url,
            ..Default::default()
        }
    }

    /// Configuration pointed at an explicit base URL
    pub fn with_api_url(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3000/api".to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }
}
