//! Order Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order status, in kitchen workflow order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Preparing,
    Ready,
    Served,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Served => "served",
        }
    }

    /// Next step of the workflow, `None` once served
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Served),
            OrderStatus::Served => None,
        }
    }

    /// Still on the kitchen's board
    pub fn is_active(&self) -> bool {
        *self != OrderStatus::Served
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line as shown to the kitchen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub name: String,
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Order entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub table_id: Option<i64>,
    #[serde(default)]
    pub reservation_id: Option<i64>,
    #[serde(default)]
    pub restaurant_id: Option<i64>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Total in currency unit
    pub total: f64,
    #[serde(default)]
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
}

/// Update order status payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}
