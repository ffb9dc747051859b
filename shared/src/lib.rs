//! Shared types for tablebook
//!
//! Wire types used by both the client (`tablebook-client`) and the
//! in-memory backend (`tablebook-mock`).

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{LoginRequest, LoginResponse, UserInfo};
pub use response::{ApiErrorBody, MessageResponse};
