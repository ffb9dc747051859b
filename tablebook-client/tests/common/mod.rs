//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{Local, NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use shared::models::{
    DiningTable, Order, OrderStatus, Reservation, ReservationCreate, ReservationStatus,
    Restaurant, TableStatus,
};
use shared::{LoginResponse, MessageResponse, UserInfo};
use tablebook_client::{
    AppContext, ClientConfig, ClientError, ClientResult, MemoryStorage, RestaurantApi,
};

/// In-process stand-in for the backend
///
/// Serves canned data, counts calls per operation and can be told to fail
/// reads or mutations.
#[derive(Default)]
pub struct FakeApi {
    pub login_reply: Mutex<LoginResponse>,
    pub restaurants: Mutex<Vec<Restaurant>>,
    pub tables: Mutex<HashMap<i64, Vec<DiningTable>>>,
    pub reservations: Mutex<Vec<Reservation>>,
    pub orders: Mutex<Vec<Order>>,
    pub created: Mutex<Vec<ReservationCreate>>,
    pub fail_login: AtomicBool,
    pub fail_reads: AtomicBool,
    pub fail_mutations: AtomicBool,
    calls: Mutex<HashMap<&'static str, usize>>,
    token: Mutex<Option<String>>,
}

impl FakeApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().get(op).copied().unwrap_or(0)
    }

    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    fn hit(&self, op: &'static str) {
        *self.calls.lock().entry(op).or_insert(0) += 1;
    }

    fn read<T: Clone>(&self, op: &'static str, value: &Mutex<T>) -> ClientResult<T> {
        self.hit(op);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("backend down".into()));
        }
        Ok(value.lock().clone())
    }

    fn mutate(&self, op: &'static str, message: &str) -> ClientResult<MessageResponse> {
        self.hit(op);
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 400,
                message: "Rejected by backend".into(),
            });
        }
        Ok(MessageResponse::message(message))
    }
}

#[async_trait]
impl RestaurantApi for FakeApi {
    async fn login(&self, _email: &str, _password: &str) -> ClientResult<LoginResponse> {
        self.hit("login");
        if self.fail_login.load(Ordering::SeqCst) {
            return Err(ClientError::Api {
                status: 401,
                message: "Invalid credentials".into(),
            });
        }
        Ok(self.login_reply.lock().clone())
    }

    async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        self.read("restaurants", &self.restaurants)
    }

    async fn tables(&self, restaurant_id: i64) -> ClientResult<Vec<DiningTable>> {
        self.hit("tables");
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(ClientError::Internal("backend down".into()));
        }
        Ok(self
            .tables
            .lock()
            .get(&restaurant_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.read("reservations", &self.reservations)
    }

    async fn create_reservation(&self, req: &ReservationCreate) -> ClientResult<MessageResponse> {
        let resp = self.mutate("create_reservation", "Reservation created successfully")?;
        self.created.lock().push(req.clone());
        Ok(resp)
    }

    async fn update_reservation(
        &self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> ClientResult<MessageResponse> {
        let resp = self.mutate("update_reservation", "Reservation updated successfully")?;
        if let Some(r) = self
            .reservations
            .lock()
            .iter_mut()
            .find(|r| r.id == reservation_id)
        {
            r.status = status;
        }
        Ok(resp)
    }

    async fn orders(&self) -> ClientResult<Vec<Order>> {
        self.read("orders", &self.orders)
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> ClientResult<MessageResponse> {
        let resp = self.mutate("update_order_status", "Order status updated successfully")?;
        if let Some(o) = self.orders.lock().iter_mut().find(|o| o.id == order_id) {
            o.status = status;
        }
        Ok(resp)
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.lock() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.lock().clone()
    }
}

pub fn context(api: Arc<FakeApi>) -> (AppContext, Arc<MemoryStorage>) {
    let storage = Arc::new(MemoryStorage::new());
    let ctx = AppContext::with_parts(ClientConfig::default(), api, storage.clone());
    (ctx, storage)
}

pub fn user(id: i64, name: &str, role: &str) -> UserInfo {
    UserInfo {
        id,
        name: name.into(),
        role: role.into(),
        email: None,
    }
}

pub fn restaurant(id: i64, name: &str, address: &str, cuisine: &str) -> Restaurant {
    Restaurant {
        id,
        name: name.into(),
        address: address.into(),
        cuisine: Some(cuisine.into()),
        description: None,
        opening_hours: None,
        phone: None,
        email: None,
    }
}

pub fn table(id: i64, restaurant_id: i64, capacity: i32, status: TableStatus) -> DiningTable {
    DiningTable {
        id,
        restaurant_id: Some(restaurant_id),
        table_number: id.to_string(),
        capacity,
        status,
    }
}

pub fn reservation(
    id: i64,
    restaurant_id: i64,
    table_id: i64,
    day: NaiveDate,
    status: ReservationStatus,
) -> Reservation {
    Reservation {
        id,
        user_id: 1,
        restaurant_id,
        table_id,
        reservation_date: day,
        reservation_time: "19:00".into(),
        guests: 2,
        status,
        special_requests: None,
        created_at: None,
    }
}

pub fn order(id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        user_id: 1,
        table_id: Some(1),
        reservation_id: None,
        restaurant_id: Some(1),
        items: Vec::new(),
        total: 18.0,
        status,
        created_at: now(),
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}
