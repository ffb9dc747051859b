//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (transport, timeout)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected the request with an `{"error": ...}` body
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Authentication required
    #[error("Authentication required")]
    Unauthorized,

    /// Permission denied
    #[error("Permission denied: {0}")]
    Forbidden(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Login answered without a usable identity
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Success status with a body that is not the expected JSON
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Message suitable for showing to the user
    ///
    /// Only messages reported by the backend are passed through; anything
    /// else (transport failures, status-only errors) shows `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api { message, .. } if !message.is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_backend_text() {
        let err = ClientError::Api {
            status: 400,
            message: "Table is already reserved for this time".into(),
        };
        assert_eq!(
            err.user_message("Failed to create reservation"),
            "Table is already reserved for this time"
        );
    }

    #[test]
    fn user_message_falls_back() {
        assert_eq!(ClientError::Unauthorized.user_message("Login failed"), "Login failed");
        assert_eq!(
            ClientError::Internal("boom".into()).user_message("Failed to update order status"),
            "Failed to update order status"
        );
        let empty = ClientError::Api {
            status: 500,
            message: String::new(),
        };
        assert_eq!(empty.user_message("Login failed"), "Login failed");
    }
}
