//! In-memory backend state
//!
//! Seeded with the demo users, five restaurants with five tables each, and a
//! handful of reservations and orders. Every request is recorded so tests
//! can assert on what the client actually sent.

use std::collections::HashMap;

use chrono::{Duration, Local, NaiveDate};
use parking_lot::RwLock;
use shared::UserInfo;
use shared::models::{
    DiningTable, Order, OrderItem, OrderStatus, Reservation, ReservationStatus, Restaurant,
    TableStatus,
};

/// Demo account
#[derive(Debug, Clone)]
pub struct MockUser {
    pub id: i64,
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

impl MockUser {
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            name: self.name.clone(),
            role: self.role.clone(),
            email: Some(self.email.clone()),
        }
    }
}

/// A request as seen by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
}

#[derive(Debug, Default)]
pub struct MockData {
    pub users: Vec<MockUser>,
    pub restaurants: Vec<Restaurant>,
    pub tables: Vec<DiningTable>,
    pub reservations: Vec<Reservation>,
    pub orders: Vec<Order>,
}

impl MockData {
    pub fn next_reservation_id(&self) -> i64 {
        self.reservations.iter().map(|r| r.id).max().unwrap_or(0) + 1
    }
}

/// Shared server state
#[derive(Debug)]
pub struct MockState {
    /// Hand out bearer tokens on login and require them afterwards
    pub issue_tokens: bool,
    pub data: RwLock<MockData>,
    tokens: RwLock<HashMap<String, i64>>,
    requests: RwLock<Vec<RecordedRequest>>,
}

impl MockState {
    pub fn new(issue_tokens: bool) -> Self {
        Self {
            issue_tokens,
            data: RwLock::new(seed(Local::now().date_naive())),
            tokens: RwLock::new(HashMap::new()),
            requests: RwLock::new(Vec::new()),
        }
    }

    pub fn issue_token(&self, user_id: i64) -> String {
        let mut tokens = self.tokens.write();
        let token = format!("mock-token-{}-{}", user_id, tokens.len() + 1);
        tokens.insert(token.clone(), user_id);
        token
    }

    /// Owner of an issued token
    pub fn token_user(&self, token: &str) -> Option<i64> {
        self.tokens.read().get(token).copied()
    }

    pub fn record(&self, request: RecordedRequest) {
        self.requests.write().push(request);
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.read().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<RecordedRequest> {
        self.requests
            .read()
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

#[allow(clippy::too_many_arguments)]
fn restaurant(
    id: i64,
    name: &str,
    address: &str,
    cuisine: &str,
    description: &str,
    phone: &str,
    email: &str,
    opening_hours: &str,
) -> Restaurant {
    Restaurant {
        id,
        name: name.into(),
        address: address.into(),
        cuisine: Some(cuisine.into()),
        description: Some(description.into()),
        opening_hours: Some(opening_hours.into()),
        phone: Some(phone.into()),
        email: Some(email.into()),
    }
}

fn seed(today: NaiveDate) -> MockData {
    let users = vec![
        MockUser {
            id: 1,
            email: "admin@restaurant.com".into(),
            password: "admin123".into(),
            name: "Restaurant Admin".into(),
            role: "restaurant_admin".into(),
        },
        MockUser {
            id: 2,
            email: "customer@example.com".into(),
            password: "customer123".into(),
            name: "Demo Customer".into(),
            role: "customer".into(),
        },
    ];

    let restaurants = vec![
        restaurant(
            1,
            "Fine Dining Restaurant",
            "123 Main Street, City Center, Berlin",
            "International",
            "A premium dining experience with world-class cuisine",
            "+49-30-123456",
            "info@finedining.com",
            "11:00 AM - 11:00 PM",
        ),
        restaurant(
            2,
            "Kebab Haus",
            "Karl-Marx-Str. 45, Neukölln, Berlin",
            "Turkish",
            "Authentic döner and Turkish grill specialties",
            "+49-30-987654",
            "info@kebabhaus.de",
            "10:00 AM - 2:00 AM",
        ),
        restaurant(
            3,
            "Pizza Napoli",
            "Ludwigstr. 12, Altstadt, Munich",
            "Italian",
            "Wood-fired pizzas and classic Italian dishes",
            "+49-89-555555",
            "info@pizzanapoli.de",
            "12:00 PM - 12:00 AM",
        ),
        restaurant(
            4,
            "Sushi Meister",
            "Königsallee 99, Stadtmitte, Düsseldorf",
            "Japanese",
            "Fresh sushi and Japanese cuisine in the heart of Düsseldorf",
            "+49-211-333333",
            "info@sushimeister.de",
            "11:30 AM - 10:30 PM",
        ),
        restaurant(
            5,
            "Bavarian Bräuhaus",
            "Marienplatz 1, Innenstadt, Munich",
            "German",
            "Traditional Bavarian food and beer garden",
            "+49-89-777777",
            "info@brauhaus.de",
            "10:00 AM - 1:00 AM",
        ),
    ];

    // Same five-table layout in every restaurant
    let layout = [
        (2, TableStatus::Available),
        (4, TableStatus::Reserved),
        (6, TableStatus::Available),
        (2, TableStatus::Occupied),
        (8, TableStatus::Available),
    ];
    let per_restaurant = layout.len() as i64;
    let tables = restaurants
        .iter()
        .flat_map(|r| {
            layout
                .iter()
                .enumerate()
                .map(move |(i, &(capacity, status))| DiningTable {
                    id: (r.id - 1) * per_restaurant + i as i64 + 1,
                    restaurant_id: Some(r.id),
                    table_number: (i + 1).to_string(),
                    capacity,
                    status,
                })
        })
        .collect();

    let created_at = today.and_hms_opt(9, 0, 0).unwrap_or_default();
    let reservations = vec![
        Reservation {
            id: 1,
            user_id: 2,
            restaurant_id: 1,
            table_id: 3,
            reservation_date: today,
            reservation_time: "19:00".into(),
            guests: 4,
            status: ReservationStatus::Confirmed,
            special_requests: Some("Window seat".into()),
            created_at: Some(created_at),
        },
        Reservation {
            id: 2,
            user_id: 2,
            restaurant_id: 3,
            table_id: 11,
            reservation_date: today + Duration::days(1),
            reservation_time: "12:30".into(),
            guests: 2,
            status: ReservationStatus::Pending,
            special_requests: None,
            created_at: Some(created_at),
        },
    ];

    let order = |id: i64, table_id: i64, status: OrderStatus, minutes_ago: i64, items: Vec<OrderItem>| {
        let total = items.iter().map(|i| i.quantity as f64 * 9.5).sum();
        Order {
            id,
            user_id: 2,
            table_id: Some(table_id),
            reservation_id: None,
            restaurant_id: Some(1),
            items,
            total,
            status,
            created_at: Local::now().naive_local() - Duration::minutes(minutes_ago),
        }
    };
    let item = |name: &str, quantity: i32, notes: Option<&str>| OrderItem {
        name: name.into(),
        quantity,
        notes: notes.map(Into::into),
    };
    let orders = vec![
        order(1, 1, OrderStatus::Pending, 5, vec![item("Schnitzel", 2, None)]),
        order(
            2,
            3,
            OrderStatus::Preparing,
            18,
            vec![item("Risotto", 1, Some("No cheese")), item("Salad", 1, None)],
        ),
        order(3, 5, OrderStatus::Ready, 32, vec![item("Soup of the day", 3, None)]),
        order(4, 4, OrderStatus::Served, 75, vec![item("Espresso", 2, None)]),
    ];

    MockData {
        users,
        restaurants,
        tables,
        reservations,
        orders,
    }
}
