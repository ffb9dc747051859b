use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::NaiveDateTime;
use parking_lot::RwLock;
use shared::models::{Order, OrderStatus};

use crate::context::AppContext;
use crate::feedback::Feedback;
use crate::guard::Route;
use crate::http::RestaurantApi;
use crate::poller::{PollHandle, spawn_poll};

/// Columns shown on the kitchen board, left to right
pub const KITCHEN_COLUMNS: [OrderStatus; 3] =
    [OrderStatus::Pending, OrderStatus::Preparing, OrderStatus::Ready];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KitchenSummary {
    pub pending: usize,
    pub preparing: usize,
    pub ready: usize,
    pub total_active: usize,
}

impl KitchenSummary {
    pub fn compute(orders: &[Order]) -> Self {
        let count = |status: OrderStatus| orders.iter().filter(|o| o.status == status).count();
        Self {
            pending: count(OrderStatus::Pending),
            preparing: count(OrderStatus::Preparing),
            ready: count(OrderStatus::Ready),
            total_active: orders.iter().filter(|o| o.status.is_active()).count(),
        }
    }
}

/// Time since an order was placed: "1h 5m" or "12m"
pub fn elapsed_label(created_at: NaiveDateTime, now: NaiveDateTime) -> String {
    let minutes = (now - created_at).num_minutes().max(0);
    let hours = minutes / 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else {
        format!("{}m", minutes)
    }
}

/// Current order list, written only by the most recently started fetch
///
/// A poll tick and a post-mutation refresh can overlap; the older one's
/// result is dropped when it lands last.
#[derive(Debug, Default)]
struct OrderBoard {
    orders: RwLock<Vec<Order>>,
    generation: AtomicU64,
}

impl OrderBoard {
    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn apply(&self, ticket: u64, list: Vec<Order>) -> bool {
        let mut orders = self.orders.write();
        if self.generation.load(Ordering::SeqCst) != ticket {
            return false;
        }
        *orders = list;
        true
    }
}

async fn fetch_orders(api: &dyn RestaurantApi, board: &OrderBoard) {
    let ticket = board.begin();
    match api.orders().await {
        Ok(list) => {
            let count = list.len();
            if board.apply(ticket, list) {
                tracing::debug!(count, "Kitchen orders fetched");
            } else {
                tracing::debug!(ticket, "Discarded superseded order fetch");
            }
        }
        Err(e) => tracing::error!("Error fetching orders: {}", e),
    }
}

/// Kitchen display: live order board
///
/// While mounted, orders are re-fetched on the configured interval. The
/// poll stops on [`unmount`](Self::unmount) or when the display is dropped.
#[derive(Debug)]
pub struct KitchenDisplay {
    ctx: AppContext,
    board: Arc<OrderBoard>,
    feedback: Feedback,
    poll: Option<PollHandle>,
}

impl KitchenDisplay {
    pub fn new(ctx: AppContext) -> Self {
        let feedback = Feedback::new(ctx.config().feedback_ttl);
        Self {
            ctx,
            board: Arc::new(OrderBoard::default()),
            feedback,
            poll: None,
        }
    }

    /// Start polling; the first fetch runs immediately
    pub fn mount(&mut self) {
        if self.poll.is_some() {
            return;
        }
        let api = self.ctx.api().clone();
        let board = self.board.clone();
        let period = self.ctx.config().kitchen_poll_interval;

        tracing::info!(period_secs = period.as_secs(), "Kitchen display mounted");
        self.poll = Some(spawn_poll("kitchen-orders", period, move || {
            let api = api.clone();
            let board = board.clone();
            async move { fetch_orders(api.as_ref(), &board).await }
        }));
    }

    /// Stop polling and wait for an in-flight fetch to be abandoned
    pub async fn unmount(&mut self) {
        if let Some(poll) = self.poll.take() {
            poll.cancel().await;
            tracing::info!("Kitchen display unmounted");
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.poll.is_some()
    }

    pub async fn refresh(&self) {
        fetch_orders(self.ctx.api().as_ref(), &self.board).await;
    }

    /// Snapshot of the current orders
    pub fn orders(&self) -> Vec<Order> {
        self.board.orders.read().clone()
    }

    pub fn column(&self, status: OrderStatus) -> Vec<Order> {
        self.board
            .orders
            .read()
            .iter()
            .filter(|o| o.status == status)
            .cloned()
            .collect()
    }

    pub fn summary(&self) -> KitchenSummary {
        KitchenSummary::compute(&self.board.orders.read())
    }

    pub fn feedback(&self) -> &Feedback {
        &self.feedback
    }

    pub fn user_name(&self) -> Option<String> {
        self.ctx.session().user_name()
    }

    /// Move an order one step along pending, preparing, ready, served
    pub async fn advance(&mut self, order_id: i64) -> bool {
        let next = self
            .board
            .orders
            .read()
            .iter()
            .find(|o| o.id == order_id)
            .and_then(|o| o.status.next());

        match next {
            Some(status) => self.update_order_status(order_id, status).await,
            None => {
                tracing::warn!(order_id, "Order not on the board or already served");
                false
            }
        }
    }

    pub async fn update_order_status(&mut self, order_id: i64, status: OrderStatus) -> bool {
        let result = self.ctx.api().update_order_status(order_id, status).await;
        match result {
            Ok(_) => {
                tracing::info!(order_id, status = %status, "Order status updated");
                self.feedback
                    .set_success(format!("Order #{} status updated to {}", order_id, status));
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

    pub async fn logout(&mut self) -> Route {
        self.unmount().await;
        super::logout(&self.ctx)
    }
}
