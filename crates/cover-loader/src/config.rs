//! Loader configuration.

use std::time::Duration;

/// Default request timeout for cover downloads
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default limit on cover size
pub const DEFAULT_MAX_BYTES: u64 = 20 * 1024 * 1024;

/// Some cover hosts reject requests without a browser-like User-Agent.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Clone)]
pub struct LoaderConfig {
    /// Bound on the whole load (fetch or read, plus decode)
    pub request_timeout: Duration,
    /// TCP connect timeout for URL covers
    pub connect_timeout: Duration,
    /// Largest accepted encoded cover
    pub max_bytes: u64,
    pub user_agent: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_TIMEOUT,
            connect_timeout: Duration::from_secs(5),
            max_bytes: DEFAULT_MAX_BYTES,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self.connect_timeout = self.connect_timeout.min(timeout);
        self
    }

    pub fn with_max_bytes(mut self, max_bytes: u64) -> Self {
        self.max_bytes = max_bytes;
        self
    }
}
