use chrono::NaiveDate;
use shared::models::{Order, OrderStatus, Reservation, ReservationStatus, Restaurant};

use super::today;
use crate::context::AppContext;
use crate::feedback::Feedback;
use crate::guard::Route;

const RECENT_LIMIT: usize = 10;

/// Headline numbers on the admin dashboard
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdminStats {
    pub total_reservations: usize,
    /// Orders not yet served
    pub active_orders: usize,
    pub restaurants: usize,
    pub todays_reservations: usize,
}

impl AdminStats {
    pub fn compute(
        reservations: &[Reservation],
        orders: &[Order],
        restaurants: &[Restaurant],
        day: NaiveDate,
    ) -> Self {
        Self {
            total_reservations: reservations.len(),
            active_orders: orders.iter().filter(|o| o.status.is_active()).count(),
            restaurants: restaurants.len(),
            todays_reservations: reservations
                .iter()
                .filter(|r| r.reservation_date == day)
                .count(),
        }
    }
}

/// Restaurant admin dashboard: reservations and orders across restaurants
#[derive(Debug)]
pub struct AdminDashboard {
    ctx: AppContext,
    reservations: Vec<Reservation>,
    orders: Vec<Order>,
    restaurants: Vec<Restaurant>,
    feedback: Feedback,
}

impl AdminDashboard {
    pub fn new(ctx: AppContext) -> Self {
        let feedback = Feedback::new(ctx.config().feedback_ttl);
        Self {
            ctx,
            reservations: Vec::new(),
            orders: Vec::new(),
            restaurants: Vec::new(),
            feedback,
        }
    }

    pub async fn activate(&mut self) {
        self.refresh().await;
    }

    /// Fetch reservations, orders and restaurants together
    ///
    /// Any failure keeps the whole previous working set.
    pub async fn refresh(&mut self) {
        let api = self.ctx.api();
        let fetched = tokio::try_join!(api.reservations(), api.orders(), api.restaurants());

        match fetched {
            Ok((reservations, orders, restaurants)) => {
                tracing::debug!(
                    reservations = reservations.len(),
                    orders = orders.len(),
                    restaurants = restaurants.len(),
                    "Admin dashboard refreshed"
                );
                self.reservations = reservations;
                self.orders = orders;
                self.restaurants = restaurants;
            }
            Err(e) => tracing::error!("Error fetching dashboard data: {}", e),
        }
    }

    pub fn reservations(&self) -> &[Reservation] {
        &self.reservations
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn restaurant_name(&self, restaurant_id: i64) -> Option<&str> {
        self.restaurants
            .iter()
            .find(|r| r.id == restaurant_id)
            .map(|r| r.name.as_str())
    }

    pub fn recent_reservations(&self) -> &[Reservation] {
        &self.reservations[..self.reservations.len().min(RECENT_LIMIT)]
    }

    pub fn recent_orders(&self) -> &[Order] {
        &self.orders[..self.orders.len().min(RECENT_LIMIT)]
    }

    pub fn stats(&self) -> AdminStats {
        AdminStats::compute(&self.reservations, &self.orders, &self.restaurants, today())
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn user_name(&self) -> Option<String> {
        self.ctx.session().user_name()
    }

    pub async fn update_reservation_status(
        &mut self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> bool {
        let result = self.ctx.api().update_reservation(reservation_id, status).await;
        match result {
            Ok(_) => {
                tracing::info!(reservation_id, status = %status, "Reservation updated");
                self.feedback.set_success("Reservation updated successfully!");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(reservation_id, "Failed to update reservation: {}", e);
                self.feedback
                    .set_error(e.user_message("Failed to update reservation"));
                false
            }
        }
    }

    pub async fn update_order_status(&mut self, order_id: i64, status: OrderStatus) -> bool {
        let result = self.ctx.api().update_order_status(order_id, status).await;
        match result {
            Ok(_) => {
                tracing::info!(order_id, status = %status, "Order status updated");
                self.feedback.set_success("Order status updated successfully!");
                self.refresh().await;
                true
            }
            Err(e) => {
                tracing::error!(order_id, "Failed to update order status: {}", e);
                self.feedback
                    .set_error(e.user_message("Failed to update order status"));
                false
            }
        }
    }

    pub fn logout(&mut self) -> Route {
        super::logout(&self.ctx)
    }
}
