use chrono::NaiveDate;
use shared::models::{DiningTable, Reservation, Restaurant};

use super::today;
use crate::availability::{DayAvailability, day_availability, reservation_for};
use crate::context::AppContext;
use crate::guard::Route;

/// One table on the floor board
#[derive(Debug, Clone, PartialEq)]
pub struct TableCard {
    pub table: DiningTable,
    pub availability: DayAvailability,
    /// Confirmed reservation holding the table, if any
    pub reservation: Option<Reservation>,
}

/// Restaurant staff view: floor board and today's bookings
#[derive(Debug)]
pub struct RestaurantView {
    ctx: AppContext,
    restaurants: Vec<Restaurant>,
    reservations: Vec<Reservation>,
    selected: Option<i64>,
    tables: Vec<DiningTable>,
}

impl RestaurantView {
    pub fn new(ctx: AppContext) -> Self {
        Self {
            ctx,
            restaurants: Vec::new(),
            reservations: Vec::new(),
            selected: None,
            tables: Vec::new(),
        }
    }

    /// Fetch restaurants and reservations, then the first restaurant's tables
    pub async fn activate(&mut self) {
        let api = self.ctx.api().clone();
        match tokio::try_join!(api.restaurants(), api.reservations()) {
            Ok((restaurants, reservations)) => {
                self.restaurants = restaurants;
                self.reservations = reservations;
            }
            Err(e) => {
                tracing::error!("Error fetching restaurant data: {}", e);
                return;
            }
        }

        let first = self.selected.or_else(|| self.restaurants.first().map(|r| r.id));
        if let Some(id) = first {
            self.select_restaurant(id).await;
        }
    }

    pub async fn select_restaurant(&mut self, restaurant_id: i64) -> bool {
        let result = self.ctx.api().tables(restaurant_id).await;
        match result {
            Ok(tables) => {
                self.selected = Some(restaurant_id);
                self.tables = tables;
                true
            }
            Err(e) => {
                tracing::error!(restaurant_id, "Error fetching tables: {}", e);
                false
            }
        }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        let id = self.selected?;
        self.restaurants.iter().find(|r| r.id == id)
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn table_board(&self) -> Vec<TableCard> {
        self.table_board_on(today())
    }

    pub fn table_board_on(&self, day: NaiveDate) -> Vec<TableCard> {
        self.tables
            .iter()
            .map(|table| TableCard {
                table: table.clone(),
                availability: day_availability(table, &self.reservations, day),
                reservation: reservation_for(table.id, &self.reservations, day).cloned(),
            })
            .collect()
    }

    pub fn todays_reservations(&self) -> Vec<&Reservation> {
        self.reservations_on(today())
    }

    /// Reservations of the selected restaurant on `day`, any status
    pub fn reservations_on(&self, day: NaiveDate) -> Vec<&Reservation> {
        let Some(id) = self.selected else {
            return Vec::new();
        };
        self.reservations
            .iter()
            .filter(|r| r.restaurant_id == id && r.reservation_date == day)
            .collect()
    }

    pub fn user_name(&self) -> Option<String> {
        self.ctx.session().user_name()
    }

    pub fn logout(&mut self) -> Route {
        super::logout(&self.ctx)
    }
}
