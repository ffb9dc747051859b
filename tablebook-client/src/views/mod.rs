//! View controllers
//!
//! One controller per screen. Each owns its working set, replaces it
//! wholesale on every fetch, and reports mutation outcomes through
//! [`Feedback`](crate::feedback::Feedback). Read failures are logged and
//! leave the previous working set in place.

mod admin;
mod customer;
mod kitchen;
mod login;
mod restaurant;

pub use admin::{AdminDashboard, AdminStats};
pub use customer::{BookingForm, CustomerDashboard, FilterOptions, RestaurantFilter, TIME_SLOTS};
pub use kitchen::{KITCHEN_COLUMNS, KitchenDisplay, KitchenSummary, elapsed_label};
pub use login::{LoginRole, LoginView};
pub use restaurant::{RestaurantView, TableCard};

use crate::context::AppContext;
use crate::guard::Route;

/// Shared logout action of every dashboard; returns where to navigate
pub(crate) fn logout(ctx: &AppContext) -> Route {
    ctx.session().logout();
    Route::Root
}

/// Today's date on the local clock
pub(crate) fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
