//! Client configuration

use std::path::PathBuf;
use std::time::Duration;

/// Client configuration for connecting to the reservation backend
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | TABLEBOOK_API_URL | http://localhost:5000 | Backend base URL |
/// | TABLEBOOK_TIMEOUT_SECS | 30 | Request timeout |
/// | TABLEBOOK_STORAGE_DIR | ./.tablebook | Persisted session directory |
/// | TABLEBOOK_KITCHEN_POLL_SECS | 30 | Kitchen refresh interval |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server base URL (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Directory holding the persisted `user` and `token` keys
    pub storage_dir: PathBuf,

    /// How often the kitchen display refreshes its orders
    pub kitchen_poll_interval: Duration,

    /// How long success/error feedback stays visible
    pub feedback_ttl: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            storage_dir: PathBuf::from("./.tablebook"),
            kitchen_poll_interval: Duration::from_secs(30),
            feedback_ttl: Duration::from_secs(3),
        }
    }

    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("TABLEBOOK_API_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("TABLEBOOK_TIMEOUT_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.timeout),
            storage_dir: std::env::var("TABLEBOOK_STORAGE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.storage_dir),
            kitchen_poll_interval: std::env::var("TABLEBOOK_KITCHEN_POLL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.kitchen_poll_interval),
            feedback_ttl: defaults.feedback_ttl,
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the session storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.storage_dir = dir.into();
        self
    }

    /// Set the kitchen refresh interval
    pub fn with_kitchen_poll_interval(mut self, interval: Duration) -> Self {
        self.kitchen_poll_interval = interval;
        self
    }

    /// Set how long feedback messages stay visible
    pub fn with_feedback_ttl(mut self, ttl: Duration) -> Self {
        self.feedback_ttl = ttl;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> crate::ClientResult<crate::NetworkApiClient> {
        crate::NetworkApiClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:5000")
    }
}
