//! API response types
//!
//! The backend answers mutations with a small message object and reports
//! failures as `{"error": "..."}`.

use serde::{Deserialize, Serialize};

/// Acknowledgement returned by mutating endpoints
///
/// ```json
/// { "message": "Reservation created successfully", "id": 12 }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Id of the created entity (create endpoints only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
}

impl MessageResponse {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            id: None,
        }
    }

    pub fn created(message: impl Into<String>, id: i64) -> Self {
        Self {
            message: Some(message.into()),
            id: Some(id),
        }
    }
}

/// Error body returned with non-2xx statuses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

impl ApiErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
