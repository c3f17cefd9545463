//! Session-core configuration.

use std::time::Duration;

/// Tunables for the lifecycle manager and profile fetcher.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Base URL of the profile API (e.g. `https://api.stmarys.edu`).
    pub api_url: String,

    /// Grace interval between observing a fresh session at startup and the
    /// first profile fetch, letting outbound-request infrastructure observe
    /// the new token.
    pub profile_fetch_grace: Duration,
}

impl SessionConfig {
    pub const DEFAULT_GRACE: Duration = Duration::from_millis(250);

    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            profile_fetch_grace: Self::DEFAULT_GRACE,
        }
    }

    /// Override the startup grace interval (tests use zero).
    pub fn with_grace(mut self, grace: Duration) -> Self {
        self.profile_fetch_grace = grace;
        self
    }

    /// Read configuration from the environment, warning and defaulting for
    /// anything missing.
    pub fn from_env() -> Self {
        let api_url = std::env::var("SCOLARIS_API_URL").unwrap_or_else(|_| {
            tracing::warn!("SCOLARIS_API_URL not set; using local dev default");
            "http://localhost:8080".to_string()
        });

        let profile_fetch_grace = std::env::var("SCOLARIS_PROFILE_GRACE_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(Self::DEFAULT_GRACE);

        Self {
            api_url,
            profile_fetch_grace,
        }
    }
}
