//! Transient user feedback
//!
//! Success and error texts shown by a view. Each message expires a fixed
//! time after it was set; expiry is evaluated on read against the tokio
//! clock, so paused-time tests can drive it.

use std::time::Duration;

use tokio::time::Instant;

#[derive(Debug, Clone)]
struct Notice {
    text: String,
    expires_at: Instant,
}

impl Notice {
    fn live(&self) -> Option<&str> {
        (Instant::now() < self.expires_at).then_some(self.text.as_str())
    }
}

/// Success/error feedback pair with a shared lifetime
#[derive(Debug, Clone)]
pub struct Feedback {
    ttl: Duration,
    success: Option<Notice>,
    error: Option<Notice>,
}

impl Feedback {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            success: None,
            error: None,
        }
    }

    pub fn set_success(&mut self, text: impl Into<String>) {
        self.success = Some(self.notice(text.into()));
    }

    pub fn set_error(&mut self, text: impl Into<String>) {
        self.error = Some(self.notice(text.into()));
    }

    /// Clear the error before a new attempt
    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn success(&self) -> Option<&str> {
        self.success.as_ref().and_then(Notice::live)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_ref().and_then(Notice::live)
    }

    fn notice(&self, text: String) -> Notice {
        Notice {
            text,
            expires_at: Instant::now() + self.ttl,
        }
    }
}

impl Default for Feedback {
    fn default() -> Self {
        Self::new(Duration::from_secs(3))
    }
}
