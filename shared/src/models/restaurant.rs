//! Restaurant Model

use serde::{Deserialize, Serialize};

/// Restaurant entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    /// Free-form, comma separated; the last two parts feed the city and
    /// district filters
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub cuisine: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub opening_hours: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Restaurant {
    fn address_part_from_end(&self, back: usize) -> Option<&str> {
        let parts: Vec<&str> = self.address.split(',').collect();
        if parts.len() < back {
            return None;
        }
        let part = parts[parts.len() - back].trim();
        (!part.is_empty()).then_some(part)
    }

    /// Second-to-last comma separated part of the address
    pub fn city(&self) -> Option<&str> {
        self.address_part_from_end(2)
    }

    /// Last comma separated part of the address
    pub fn district(&self) -> Option<&str> {
        self.address_part_from_end(1)
    }
}
