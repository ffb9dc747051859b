//! Data models
//!
//! Pass-through DTOs received from the backend API.
//! All IDs are `i64` (backend INTEGER PRIMARY KEY).

pub mod dining_table;
pub mod order;
pub mod reservation;
pub mod restaurant;

// Re-exports
pub use dining_table::*;
pub use order::*;
pub use reservation::*;
pub use restaurant::*;
