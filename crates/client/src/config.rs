use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "/hub/graphql";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BACKOFF_BASE: Duration = Duration::from_secs(1);

/// Upstream connection settings
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the platform, e.g. `https://hub.example.com`
    pub url: String,
    /// Path of the GraphQL endpoint below `url`, or an absolute URL
    pub endpoint: String,
    /// Sent as `Authorization: Bearer <token>` when set
    pub token: Option<String>,
    /// Applies to each attempt separately
    pub timeout: Duration,
    pub max_retries: u32,
    /// Delay before the first retry; doubles on every further retry
    pub backoff_base: Duration,
}

impl ClientConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            max_retries: DEFAULT_MAX_RETRIES,
            backoff_base: DEFAULT_BACKOFF_BASE,
        }
    }

    /// Full URL requests are posted to
    #[must_use]
    pub fn graphql_url(&self) -> String {
        if self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://") {
            return self.endpoint.clone();
        }
        format!(
            "{}/{}",
            self.url.trim_end_matches('/'),
            self.endpoint.trim_start_matches('/')
        )
    }

    /// Backoff before retry number `retry` (0-based)
    #[must_use]
    pub fn backoff_for(&self, retry: u32) -> Duration {
        self.backoff_base
            .saturating_mul(2u32.saturating_pow(retry))
    }
}
