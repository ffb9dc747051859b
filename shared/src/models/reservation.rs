//! Reservation Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reservation status
///
/// Reservations without a status are pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ReservationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reservation entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub table_id: i64,
    pub reservation_date: NaiveDate,
    /// `HH:MM`
    pub reservation_time: String,
    pub guests: i32,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub special_requests: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<NaiveDateTime>,
}

impl Reservation {
    /// Confirmed reservation holding its table on `day`
    pub fn holds_table_on(&self, day: NaiveDate) -> bool {
        self.status == ReservationStatus::Confirmed && self.reservation_date == day
    }
}

/// Create reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationCreate {
    pub table_id: i64,
    pub restaurant_id: i64,
    pub reservation_date: NaiveDate,
    pub reservation_time: String,
    pub guests: i32,
    pub special_requests: String,
}

/// Update reservation payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationUpdate {
    pub status: ReservationStatus,
}
