//! Tablebook Client - reservation and ordering client
//!
//! Session handling, route gating and the screen controllers of the
//! restaurant reservation app, talking to the backend over HTTP.

pub mod availability;
pub mod config;
pub mod context;
pub mod error;
pub mod feedback;
pub mod guard;
pub mod http;
pub mod poller;
pub mod session;
pub mod storage;
pub mod views;

pub use config::ClientConfig;
pub use context::AppContext;
pub use error::{ClientError, ClientResult};
pub use feedback::Feedback;
pub use guard::{Navigation, Route, RouteGuard};
pub use http::{NetworkApiClient, RestaurantApi};
pub use poller::{PollHandle, spawn_poll};
pub use session::{LoginFailure, SessionState, SessionStore};
pub use storage::{FileStorage, MemoryStorage, SessionStorage, StorageError};

// Re-export shared types for convenience
pub use shared::{LoginResponse, UserInfo};
