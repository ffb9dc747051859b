use std::sync::Arc;

use axum::extract::{Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use shared::models::{
    DiningTable, Order, OrderStatusUpdate, Reservation, ReservationCreate, ReservationStatus,
    ReservationUpdate, Restaurant,
};
use shared::{LoginRequest, LoginResponse, MessageResponse};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::{MockError, MockResult};
use crate::state::{MockState, RecordedRequest};

type AppState = State<Arc<MockState>>;

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
}

/// Check the bearer token when tokens are issued; returns the caller's id
fn authorize(state: &MockState, headers: &HeaderMap) -> MockResult<Option<i64>> {
    if !state.issue_tokens {
        return Ok(None);
    }
    bearer(headers)
        .and_then(|token| state.token_user(token))
        .map(Some)
        .ok_or_else(|| MockError::Unauthorized("Missing or invalid token".into()))
}

async fn record_request(State(state): AppState, req: Request, next: Next) -> Response {
    state.record(RecordedRequest {
        method: req.method().to_string(),
        path: req.uri().path().to_string(),
        authorization: req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .map(String::from),
    });
    next.run(req).await
}

async fn login(
    State(state): AppState,
    Json(req): Json<LoginRequest>,
) -> MockResult<Json<LoginResponse>> {
    let user = state
        .data
        .read()
        .users
        .iter()
        .find(|u| u.email == req.email && u.password == req.password)
        .cloned()
        .ok_or_else(|| MockError::Unauthorized("Invalid credentials".into()))?;

    let access_token = state.issue_tokens.then(|| state.issue_token(user.id));
    tracing::info!(user_id = user.id, token = access_token.is_some(), "Mock login");

    Ok(Json(LoginResponse {
        access_token,
        user: Some(user.info()),
    }))
}

async fn restaurants(
    State(state): AppState,
    headers: HeaderMap,
) -> MockResult<Json<Vec<Restaurant>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.data.read().restaurants.clone()))
}

async fn tables(
    State(state): AppState,
    headers: HeaderMap,
    Path(restaurant_id): Path<i64>,
) -> MockResult<Json<Vec<DiningTable>>> {
    authorize(&state, &headers)?;
    let tables = state
        .data
        .read()
        .tables
        .iter()
        .filter(|t| t.restaurant_id == Some(restaurant_id))
        .cloned()
        .collect();
    Ok(Json(tables))
}

async fn reservations(
    State(state): AppState,
    headers: HeaderMap,
) -> MockResult<Json<Vec<Reservation>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.data.read().reservations.clone()))
}

async fn create_reservation(
    State(state): AppState,
    headers: HeaderMap,
    Json(req): Json<ReservationCreate>,
) -> MockResult<(StatusCode, Json<MessageResponse>)> {
    let caller = authorize(&state, &headers)?;
    let mut data = state.data.write();

    // Without tokens the first account owns every booking
    let user_id = caller
        .or_else(|| data.users.first().map(|u| u.id))
        .ok_or_else(|| MockError::BadRequest("No user found".into()))?;

    let taken = data.reservations.iter().any(|r| {
        r.table_id == req.table_id
            && r.reservation_date == req.reservation_date
            && r.reservation_time == req.reservation_time
    });
    if taken {
        return Err(MockError::BadRequest(
            "Table is already reserved for this time".into(),
        ));
    }

    let id = data.next_reservation_id();
    data.reservations.push(Reservation {
        id,
        user_id,
        restaurant_id: req.restaurant_id,
        table_id: req.table_id,
        reservation_date: req.reservation_date,
        reservation_time: req.reservation_time,
        guests: req.guests,
        status: ReservationStatus::Pending,
        special_requests: Some(req.special_requests),
        created_at: Some(chrono::Local::now().naive_local()),
    });
    tracing::info!(reservation_id = id, table_id = req.table_id, "Mock reservation created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::created("Reservation created successfully", id)),
    ))
}

async fn update_reservation(
    State(state): AppState,
    headers: HeaderMap,
    Path(reservation_id): Path<i64>,
    Json(req): Json<ReservationUpdate>,
) -> MockResult<Json<MessageResponse>> {
    authorize(&state, &headers)?;
    let mut data = state.data.write();
    let reservation = data
        .reservations
        .iter_mut()
        .find(|r| r.id == reservation_id)
        .ok_or_else(|| MockError::NotFound("Reservation not found".into()))?;
    reservation.status = req.status;
    Ok(Json(MessageResponse::message(
        "Reservation updated successfully",
    )))
}

async fn orders(State(state): AppState, headers: HeaderMap) -> MockResult<Json<Vec<Order>>> {
    authorize(&state, &headers)?;
    Ok(Json(state.data.read().orders.clone()))
}

async fn update_order_status(
    State(state): AppState,
    headers: HeaderMap,
    Path(order_id): Path<i64>,
    Json(req): Json<OrderStatusUpdate>,
) -> MockResult<Json<MessageResponse>> {
    authorize(&state, &headers)?;
    let mut data = state.data.write();
    let order = data
        .orders
        .iter_mut()
        .find(|o| o.id == order_id)
        .ok_or_else(|| MockError::NotFound("Order not found".into()))?;
    order.status = req.status;
    Ok(Json(MessageResponse::message(
        "Order status updated successfully",
    )))
}

pub fn router(state: Arc<MockState>) -> Router {
    Router::new()
        .route("/api/login", post(login))
        .route("/api/restaurants", get(restaurants))
        .route("/api/restaurants/{id}/tables", get(tables))
        .route(
            "/api/reservations",
            get(reservations).post(create_reservation),
        )
        .route("/api/reservations/{id}", put(update_reservation))
        .route("/api/orders", get(orders))
        .route("/api/orders/{id}/status", put(update_order_status))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
