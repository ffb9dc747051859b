use chrono::NaiveDate;
use shared::models::{DiningTable, Reservation, ReservationCreate, Restaurant};

use super::today;
use crate::availability::{AvailabilityIndex, select_table};
use crate::context::AppContext;
use crate::feedback::Feedback;
use crate::guard::Route;

/// Bookable time slots shown in the booking form
pub const TIME_SLOTS: [&str; 17] = [
    "11:00", "11:30", "12:00", "12:30", "13:00", "13:30", "14:00", "14:30", "17:00", "17:30",
    "18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00",
];

const NO_TABLES: &str = "No available tables for the requested number of guests";
const MISSING_SLOT: &str = "Please select a date and time";
const BOOKING_FAILED: &str = "Failed to create reservation";
const BOOKING_CREATED: &str = "Reservation created successfully!";

/// Booking form state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingForm {
    pub date: Option<NaiveDate>,
    /// One of [`TIME_SLOTS`], empty until chosen
    pub time: String,
    pub guests: i32,
    pub special_requests: String,
}

impl Default for BookingForm {
    fn default() -> Self {
        Self {
            date: None,
            time: String::new(),
            guests: 1,
            special_requests: String::new(),
        }
    }
}

/// Restaurant list filters; empty fields match everything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    pub cuisine: Option<String>,
    pub city: Option<String>,
    pub district: Option<String>,
    /// 0 disables the filter
    pub min_available_tables: usize,
}

impl RestaurantFilter {
    /// `available` is `None` while the restaurant's tables are unknown;
    /// the table-count filter is skipped for it then.
    pub fn matches(&self, restaurant: &Restaurant, available: Option<usize>) -> bool {
        if let Some(cuisine) = &self.cuisine
            && restaurant.cuisine.as_deref() != Some(cuisine.as_str())
        {
            return false;
        }
        if let Some(city) = &self.city
            && restaurant.city() != Some(city.as_str())
        {
            return false;
        }
        if let Some(district) = &self.district
            && restaurant.district() != Some(district.as_str())
        {
            return false;
        }
        if self.min_available_tables > 0
            && let Some(count) = available
            && count < self.min_available_tables
        {
            return false;
        }
        true
    }
}

/// Distinct filter values, in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOptions {
    pub cuisines: Vec<String>,
    pub cities: Vec<String>,
    pub districts: Vec<String>,
}

impl FilterOptions {
    pub fn from_restaurants(restaurants: &[Restaurant]) -> Self {
        fn push_unique(values: &mut Vec<String>, value: Option<&str>) {
            if let Some(value) = value.filter(|v| !v.is_empty())
                && !values.iter().any(|v| v == value)
            {
                values.push(value.to_string());
            }
        }

        let mut options = Self::default();
        for r in restaurants {
            push_unique(&mut options.cuisines, r.cuisine.as_deref());
            push_unique(&mut options.cities, r.city());
            push_unique(&mut options.districts, r.district());
        }
        options
    }
}

/// Customer dashboard: browse restaurants and book a table
#[derive(Debug)]
pub struct CustomerDashboard {
    ctx: AppContext,
    restaurants: Vec<Restaurant>,
    reservations: Vec<Reservation>,
    availability: AvailabilityIndex,
    selected: Option<Restaurant>,
    tables: Vec<DiningTable>,
    booking_open: bool,
    form: BookingForm,
    pub filter: RestaurantFilter,
    feedback: Feedback,
}

impl CustomerDashboard {
    pub fn new(ctx: AppContext) -> Self {
        let feedback = Feedback::new(ctx.config().feedback_ttl);
        Self {
            ctx,
            restaurants: Vec::new(),
            reservations: Vec::new(),
            availability: AvailabilityIndex::new(),
            selected: None,
            tables: Vec::new(),
            booking_open: false,
            form: BookingForm::default(),
            filter: RestaurantFilter::default(),
            feedback,
        }
    }

    pub async fn activate(&mut self) {
        self.refresh().await;
    }

    /// Re-fetch restaurants and reservations, then sync table availability
    pub async fn refresh(&mut self) {
        let api = self.ctx.api().clone();

        match api.restaurants().await {
            Ok(restaurants) => self.restaurants = restaurants,
            Err(e) => tracing::error!("Error fetching restaurants: {}", e),
        }
        match api.reservations().await {
            Ok(reservations) => self.reservations = reservations,
            Err(e) => tracing::error!("Error fetching reservations: {}", e),
        }
        self.availability.sync(api.as_ref(), &self.restaurants).await;
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.selected.as_ref()
    }

    pub fn tables(&self) -> &[DiningTable] {
        &self.tables
    }

    pub fn is_booking_open(&self) -> bool {
        self.booking_open
    }

    pub fn form(&self) -> &BookingForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut BookingForm {
        &mut self.form
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn user_name(&self) -> Option<String> {
        self.ctx.session().user_name()
    }

    pub fn filter_options(&self) -> FilterOptions {
        FilterOptions::from_restaurants(&self.restaurants)
    }

    /// Available tables today; `None` while not yet known
    pub fn available_tables(&self, restaurant_id: i64) -> Option<usize> {
        self.availability
            .available_count(restaurant_id, &self.reservations, today())
    }

    /// Restaurants passing the current filter
    pub fn visible_restaurants(&self) -> Vec<&Restaurant> {
        self.visible_restaurants_on(today())
    }

    pub fn visible_restaurants_on(&self, day: NaiveDate) -> Vec<&Restaurant> {
        self.restaurants
            .iter()
            .filter(|r| {
                let available = self
                    .availability
                    .available_count(r.id, &self.reservations, day);
                self.filter.matches(r, available)
            })
            .collect()
    }

    /// Load a restaurant's tables and open the booking form
    pub async fn select_restaurant(&mut self, restaurant_id: i64) -> bool {
        let Some(restaurant) = self
            .restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .cloned()
        else {
            tracing::warn!(restaurant_id, "Selected restaurant is not in the list");
            return false;
        };

        // Selection only moves once the new table list is in hand
        let result = self.ctx.api().tables(restaurant_id).await;
        match result {
            Ok(tables) => {
                self.selected = Some(restaurant);
                self.availability.replace(restaurant_id, tables.clone());
                self.tables = tables;
                self.form = BookingForm::default();
                self.booking_open = true;
                true
            }
            Err(e) => {
                tracing::error!(restaurant_id, "Error fetching tables: {}", e);
                false
            }
        }
    }

    pub fn close_booking(&mut self) {
        self.booking_open = false;
    }

    /// Submit the booking form
    ///
    /// The first table with enough seats and an available status is chosen
    /// locally; when none qualifies the backend is not contacted.
    pub async fn submit_booking(&mut self) -> bool {
        self.feedback.clear_error();

        let Some(restaurant_id) = self.selected.as_ref().map(|r| r.id) else {
            tracing::warn!("Booking submitted without a selected restaurant");
            return false;
        };

        let Some(table_id) = select_table(&self.tables, self.form.guests).map(|t| t.id) else {
            self.feedback.set_error(NO_TABLES);
            return false;
        };

        let Some(date) = self.form.date.filter(|_| !self.form.time.is_empty()) else {
            self.feedback.set_error(MISSING_SLOT);
            return false;
        };

        let request = ReservationCreate {
            table_id,
            restaurant_id,
            reservation_date: date,
            reservation_time: self.form.time.clone(),
            guests: self.form.guests,
            special_requests: self.form.special_requests.clone(),
        };

        let result = self.ctx.api().create_reservation(&request).await;
        match result {
            Ok(resp) => {
                tracing::info!(restaurant_id, table_id, reservation_id = ?resp.id, "Reservation created");
                self.feedback.set_success(BOOKING_CREATED);
                self.booking_open = false;
                self.form = BookingForm::default();
                self.refresh().await;
                self.reload_selected_tables().await;
                true
            }
            Err(e) => {
                tracing::error!(restaurant_id, table_id, "Failed to create reservation: {}", e);
                self.feedback.set_error(e.user_message(BOOKING_FAILED));
                false
            }
        }
    }

    async fn reload_selected_tables(&mut self) {
        let Some(restaurant_id) = self.selected.as_ref().map(|r| r.id) else {
            return;
        };
        match self.ctx.api().tables(restaurant_id).await {
            Ok(tables) => {
                self.availability.replace(restaurant_id, tables.clone());
                self.tables = tables;
            }
            Err(e) => tracing::error!(restaurant_id, "Error fetching tables: {}", e),
        }
    }

    pub fn logout(&mut self) -> Route {
        super::logout(&self.ctx)
    }
}
