//! Client-related types shared between backend and client
//!
//! Auth request/response types used by `POST /api/login`.

use serde::{Deserialize, Serialize};

// =============================================================================
// Auth API DTOs
// =============================================================================

/// Login request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response data
///
/// Some deployments rely on a server-side session and omit `access_token`.
/// `user` is optional on the wire so that a 200 without an identity can be
/// told apart from a malformed body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserInfo>,
}

/// User information
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub name: String,
    /// `customer` or `restaurant_admin`
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserInfo {
    pub fn is_restaurant_admin(&self) -> bool {
        self.role == "restaurant_admin"
    }
}
