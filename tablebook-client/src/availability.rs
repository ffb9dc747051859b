//! Table availability projections
//!
//! Read-only joins of table lists against reservations. Nothing here is
//! authoritative: the backend still arbitrates every booking.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use futures::future::join_all;
use shared::models::{DiningTable, Reservation, Restaurant, TableStatus};

use crate::http::RestaurantApi;

/// Table state for a given day, as shown on the floor board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayAvailability {
    Available,
    Reserved,
}

/// Confirmed reservation holding `table_id` on `day`
pub fn reservation_for<'a>(
    table_id: i64,
    reservations: &'a [Reservation],
    day: NaiveDate,
) -> Option<&'a Reservation> {
    reservations
        .iter()
        .find(|r| r.table_id == table_id && r.holds_table_on(day))
}

/// Availability of a table on `day`, judged by confirmed reservations only
pub fn day_availability(
    table: &DiningTable,
    reservations: &[Reservation],
    day: NaiveDate,
) -> DayAvailability {
    match reservation_for(table.id, reservations, day) {
        Some(_) => DayAvailability::Reserved,
        None => DayAvailability::Available,
    }
}

/// Booking pre-check: first table seating `guests` whose status is available
pub fn select_table(tables: &[DiningTable], guests: i32) -> Option<&DiningTable> {
    tables.iter().find(|t| t.fits(guests))
}

/// Tables free for walk-in or booking on `day`
pub fn available_table_count(
    tables: &[DiningTable],
    reservations: &[Reservation],
    day: NaiveDate,
) -> usize {
    tables
        .iter()
        .filter(|t| t.status == TableStatus::Available)
        .filter(|t| reservation_for(t.id, reservations, day).is_none())
        .count()
}

/// Per-restaurant table lists, fetched only when the restaurant set changes
///
/// Counts are derived on demand from the cached tables, so a reservation
/// change costs no extra requests.
#[derive(Debug, Default, Clone)]
pub struct AvailabilityIndex {
    tables: HashMap<i64, Vec<DiningTable>>,
}

impl AvailabilityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restaurants whose tables are not cached yet
    pub fn missing(&self, restaurants: &[Restaurant]) -> Vec<i64> {
        restaurants
            .iter()
            .map(|r| r.id)
            .filter(|id| !self.tables.contains_key(id))
            .collect()
    }

    /// Sync the cache with `restaurants`, fetching missing table lists concurrently
    ///
    /// Returns the number of table requests issued. Failed fetches stay
    /// missing and are retried on the next sync.
    pub async fn sync(&mut self, api: &dyn RestaurantApi, restaurants: &[Restaurant]) -> usize {
        let wanted: HashSet<i64> = restaurants.iter().map(|r| r.id).collect();
        self.tables.retain(|id, _| wanted.contains(id));

        let missing = self.missing(restaurants);
        if missing.is_empty() {
            return 0;
        }

        tracing::debug!(count = missing.len(), "Fetching table lists for availability");
        let results = join_all(missing.iter().map(|&id| async move { (id, api.tables(id).await) })).await;
        for (id, result) in results {
            match result {
                Ok(tables) => {
                    self.tables.insert(id, tables);
                }
                Err(e) => {
                    tracing::error!(restaurant_id = id, "Error fetching tables: {}", e);
                }
            }
        }
        missing.len()
    }

    /// Replace one restaurant's cached tables (after a direct fetch)
    pub fn replace(&mut self, restaurant_id: i64, tables: Vec<DiningTable>) {
        self.tables.insert(restaurant_id, tables);
    }

    /// Available tables for a restaurant on `day`; `None` until its tables are known
    pub fn available_count(
        &self,
        restaurant_id: i64,
        reservations: &[Reservation],
        day: NaiveDate,
    ) -> Option<usize> {
        self.tables
            .get(&restaurant_id)
            .map(|tables| available_table_count(tables, reservations, day))
    }
}
