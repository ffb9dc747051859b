mod common;

use std::time::Duration;

use common::{FakeApi, context, order, reservation, restaurant, table, today};
use shared::models::{OrderStatus, ReservationStatus, TableStatus};
use tablebook_client::Route;
use tablebook_client::availability::DayAvailability;
use tablebook_client::views::{
    AdminDashboard, CustomerDashboard, KitchenDisplay, RestaurantFilter, RestaurantView,
};

fn seeded() -> std::sync::Arc<FakeApi> {
    let api = FakeApi::new();
    *api.restaurants.lock() = vec![
        restaurant(1, "Fine Dining", "123 Main Street, City Center, Berlin", "International"),
        restaurant(5, "Bräuhaus", "Marienplatz 1, Innenstadt, Munich", "German"),
    ];
    api.tables.lock().insert(
        1,
        vec![
            table(1, 1, 2, TableStatus::Available),
            table(2, 1, 4, TableStatus::Reserved),
        ],
    );
    api.tables.lock().insert(
        5,
        vec![
            table(7, 5, 2, TableStatus::Occupied),
            table(9, 5, 4, TableStatus::Available),
            table(10, 5, 6, TableStatus::Available),
        ],
    );
    api
}

#[tokio::test]
async fn booking_uses_first_fitting_table() {
    let api = seeded();
    let (ctx, _) = context(api.clone());
    let mut view = CustomerDashboard::new(ctx);
    view.activate().await;

    assert!(view.select_restaurant(5).await);
    assert!(view.is_booking_open());
    assert_eq!(view.form().guests, 1);

    let form = view.form_mut();
    form.guests = 4;
    form.date = Some(today());
    form.time = "19:00".into();
    assert!(view.submit_booking().await);

    let created = api.created.lock().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].table_id, 9);
    assert_eq!(created[0].restaurant_id, 5);
    assert_eq!(created[0].guests, 4);
    assert_eq!(view.feedback().success(), Some("Reservation created successfully!"));
    assert!(!view.is_booking_open());
    assert_eq!(view.form().guests, 1);
    // activate + re-fetch after the booking
    assert_eq!(api.calls("reservations"), 2);
}

#[tokio::test]
async fn booking_rejected_locally_when_no_table_fits() {
    let api = seeded();
    let (ctx, _) = context(api.clone());
    let mut view = CustomerDashboard::new(ctx);
    view.activate().await;
    view.select_restaurant(5).await;

    let form = view.form_mut();
    form.guests = 7;
    form.date = Some(today());
    form.time = "12:00".into();
    assert!(!view.submit_booking().await);

    assert_eq!(
        view.feedback().error(),
        Some("No available tables for the requested number of guests")
    );
    assert_eq!(api.calls("create_reservation"), 0);
    assert!(view.is_booking_open());
}

#[tokio::test]
async fn failed_selection_keeps_previous_restaurant() {
    let api = seeded();
    let (ctx, _) = context(api.clone());
    let mut view = CustomerDashboard::new(ctx);
    view.activate().await;
    assert!(view.select_restaurant(1).await);

    api.fail_reads(true);
    assert!(!view.select_restaurant(5).await);
    api.fail_reads(false);

    assert_eq!(view.selected_restaurant().map(|r| r.id), Some(1));
    assert!(view.tables().iter().all(|t| t.restaurant_id == Some(1)));

    let form = view.form_mut();
    form.date = Some(today());
    form.time = "19:00".into();
    assert!(view.submit_booking().await);

    let created = api.created.lock().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].restaurant_id, 1);
    assert_eq!(created[0].table_id, 1);
}

#[tokio::test]
async fn booking_failure_reports_backend_message() {
    let api = seeded();
    let (ctx, _) = context(api.clone());
    let mut view = CustomerDashboard::new(ctx);
    view.activate().await;
    view.select_restaurant(1).await;
    api.fail_mutations(true);

    let form = view.form_mut();
    form.date = Some(today());
    form.time = "11:30".into();
    assert!(!view.submit_booking().await);

    assert_eq!(view.feedback().error(), Some("Rejected by backend"));
    assert!(view.feedback().success().is_none());
    assert_eq!(api.calls("reservations"), 1);
}

#[tokio::test]
async fn table_lists_fetched_once_per_restaurant_set() {
    let api = seeded();
    let (ctx, _) = context(api.clone());
    let mut view = CustomerDashboard::new(ctx);

    view.activate().await;
    assert_eq!(api.calls("tables"), 2);
    assert_eq!(view.available_tables(5), Some(2));

    view.refresh().await;
    assert_eq!(api.calls("tables"), 2);

    api.restaurants
        .lock()
        .push(restaurant(8, "New Place", "Somewhere 1, Mitte, Berlin", "Thai"));
    view.refresh().await;
    assert_eq!(api.calls("tables"), 3);
    assert_eq!(view.available_tables(8), Some(0));
}

#[tokio::test]
async fn confirmed_booking_today_lowers_availability() {
    let api = seeded();
    *api.reservations.lock() = vec![reservation(1, 5, 9, today(), ReservationStatus::Confirmed)];
    let (ctx, _) = context(api.clone());
    let mut view = CustomerDashboard::new(ctx);
    view.activate().await;

    assert_eq!(view.available_tables(5), Some(1));
    assert_eq!(view.available_tables(1), Some(1));

    view.filter = RestaurantFilter {
        min_available_tables: 2,
        ..Default::default()
    };
    assert!(view.visible_restaurants().is_empty());

    view.filter = RestaurantFilter {
        district: Some("Munich".into()),
        ..Default::default()
    };
    let names: Vec<&str> = view
        .visible_restaurants()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names, ["Bräuhaus"]);
    assert_eq!(view.filter_options().cities, ["City Center", "Innenstadt"]);
}

#[tokio::test]
async fn admin_order_update_refetches_on_success_only() {
    let api = seeded();
    *api.orders.lock() = vec![order(1, OrderStatus::Pending), order(2, OrderStatus::Served)];
    let (ctx, _) = context(api.clone());
    let mut admin = AdminDashboard::new(ctx);
    admin.activate().await;
    assert_eq!(admin.stats().active_orders, 1);

    assert!(admin.update_order_status(1, OrderStatus::Preparing).await);
    assert_eq!(api.calls("orders"), 2);
    assert_eq!(admin.orders()[0].status, OrderStatus::Preparing);
    assert_eq!(admin.feedback().success(), Some("Order status updated successfully!"));

    api.fail_mutations(true);
    assert!(!admin.update_order_status(1, OrderStatus::Ready).await);
    assert_eq!(api.calls("orders"), 2);
    assert_eq!(admin.orders()[0].status, OrderStatus::Preparing);
    assert_eq!(admin.feedback().error(), Some("Rejected by backend"));
}

#[tokio::test]
async fn admin_keeps_working_set_when_any_fetch_fails() {
    let api = seeded();
    *api.reservations.lock() = vec![reservation(1, 1, 1, today(), ReservationStatus::Pending)];
    let (ctx, _) = context(api.clone());
    let mut admin = AdminDashboard::new(ctx);
    admin.activate().await;
    assert_eq!(admin.stats().todays_reservations, 1);
    assert_eq!(admin.restaurant_name(5), Some("Bräuhaus"));

    api.fail_reads(true);
    api.reservations.lock().clear();
    admin.refresh().await;

    assert_eq!(admin.reservations().len(), 1);
    assert_eq!(admin.restaurants().len(), 2);
}

#[tokio::test]
async fn admin_reservation_update() {
    let api = seeded();
    *api.reservations.lock() = vec![reservation(4, 1, 1, today(), ReservationStatus::Pending)];
    let (ctx, _) = context(api.clone());
    let mut admin = AdminDashboard::new(ctx);
    admin.activate().await;

    assert!(
        admin
            .update_reservation_status(4, ReservationStatus::Confirmed)
            .await
    );
    assert_eq!(admin.reservations()[0].status, ReservationStatus::Confirmed);
    assert_eq!(admin.feedback().success(), Some("Reservation updated successfully!"));

    api.fail_mutations(true);
    assert!(
        !admin
            .update_reservation_status(4, ReservationStatus::Cancelled)
            .await
    );
    assert_eq!(admin.reservations()[0].status, ReservationStatus::Confirmed);
}

#[tokio::test(start_paused = true)]
async fn feedback_clears_after_three_seconds() {
    let api = seeded();
    *api.orders.lock() = vec![order(1, OrderStatus::Pending)];
    let (ctx, _) = context(api);
    let mut admin = AdminDashboard::new(ctx);
    admin.activate().await;
    admin.update_order_status(1, OrderStatus::Preparing).await;

    tokio::time::sleep(Duration::from_millis(2900)).await;
    assert!(admin.feedback().success().is_some());
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert!(admin.feedback().success().is_none());
}

#[tokio::test]
async fn restaurant_board_marks_todays_confirmed_tables() {
    let api = seeded();
    *api.reservations.lock() = vec![
        reservation(1, 1, 1, today(), ReservationStatus::Confirmed),
        reservation(2, 1, 2, today(), ReservationStatus::Pending),
        reservation(3, 5, 9, today(), ReservationStatus::Confirmed),
    ];
    let (ctx, _) = context(api.clone());
    let mut view = RestaurantView::new(ctx);
    view.activate().await;

    assert_eq!(view.selected_restaurant().map(|r| r.id), Some(1));
    let board = view.table_board();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].availability, DayAvailability::Reserved);
    assert_eq!(board[0].reservation.as_ref().map(|r| r.id), Some(1));
    assert_eq!(board[1].availability, DayAvailability::Available);
    assert_eq!(view.todays_reservations().len(), 2);

    assert!(view.select_restaurant(5).await);
    assert_eq!(view.tables().len(), 3);
    assert_eq!(view.todays_reservations().len(), 1);
}

#[tokio::test]
async fn restaurant_board_survives_failed_selection() {
    let api = seeded();
    let (ctx, _) = context(api.clone());
    let mut view = RestaurantView::new(ctx);
    view.activate().await;
    assert_eq!(view.selected_restaurant().map(|r| r.id), Some(1));

    api.fail_reads(true);
    assert!(!view.select_restaurant(5).await);

    assert_eq!(view.selected_restaurant().map(|r| r.id), Some(1));
    assert_eq!(view.tables().len(), 2);
    assert!(view.tables().iter().all(|t| t.restaurant_id == Some(1)));
}

#[tokio::test]
async fn kitchen_advances_orders_and_refetches() {
    let api = seeded();
    *api.orders.lock() = vec![order(3, OrderStatus::Pending), order(4, OrderStatus::Ready)];
    let (ctx, _) = context(api.clone());
    let mut kitchen = KitchenDisplay::new(ctx);
    kitchen.refresh().await;

    assert!(kitchen.advance(3).await);
    assert_eq!(kitchen.feedback().success(), Some("Order #3 status updated to preparing"));
    assert_eq!(kitchen.column(OrderStatus::Preparing).len(), 1);
    assert_eq!(api.calls("orders"), 2);

    assert!(kitchen.advance(4).await);
    assert_eq!(kitchen.summary().total_active, 1);

    // Served orders have no next step
    assert!(!kitchen.advance(4).await);
    assert_eq!(api.calls("update_order_status"), 2);

    api.fail_mutations(true);
    assert!(!kitchen.advance(3).await);
    assert_eq!(kitchen.feedback().error(), Some("Rejected by backend"));
    assert_eq!(kitchen.column(OrderStatus::Preparing).len(), 1);
}

#[tokio::test]
async fn dashboards_logout_to_root() {
    let api = seeded();
    *api.login_reply.lock() = shared::LoginResponse {
        access_token: Some("t".into()),
        user: Some(common::user(1, "Jane", "customer")),
    };
    let (ctx, storage) = context(api.clone());
    ctx.session().login("a", "b").await.unwrap();

    let mut view = CustomerDashboard::new(ctx.clone());
    assert_eq!(view.user_name().as_deref(), Some("Jane"));
    assert_eq!(view.logout(), Route::Root);
    assert!(storage.is_empty());
    assert!(!ctx.session().is_authenticated());
}
