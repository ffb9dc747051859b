//! Dining Table Model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Table status as stored by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

impl TableStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TableStatus::Available => "available",
            TableStatus::Occupied => "occupied",
            TableStatus::Reserved => "reserved",
        }
    }
}

impl fmt::Display for TableStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dining table entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiningTable {
    pub id: i64,
    /// Not every backend includes the owner in the per-restaurant listing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_id: Option<i64>,
    pub table_number: String,
    pub capacity: i32,
    #[serde(default)]
    pub status: TableStatus,
}

impl DiningTable {
    /// Whether this table can seat `guests` and is currently free
    pub fn fits(&self, guests: i32) -> bool {
        self.capacity >= guests && self.status == TableStatus::Available
    }
}
