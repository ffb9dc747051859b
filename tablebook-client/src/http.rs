//! HTTP client for the reservation backend
//!
//! [`RestaurantApi`] is the seam every controller talks through.
//! [`NetworkApiClient`] is the reqwest implementation; clones share one
//! credential binding, so a token bound after login is attached to every
//! request made through any clone until it is cleared.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{
    DiningTable, Order, OrderStatus, OrderStatusUpdate, Reservation, ReservationCreate,
    ReservationStatus, ReservationUpdate, Restaurant,
};
use shared::{ApiErrorBody, LoginRequest, LoginResponse, MessageResponse};

use crate::{ClientConfig, ClientError, ClientResult};

/// Backend REST surface consumed by the views
#[async_trait]
pub trait RestaurantApi: Send + Sync {
    /// `POST /api/login`
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse>;
    /// `GET /api/restaurants`
    async fn restaurants(&self) -> ClientResult<Vec<Restaurant>>;
    /// `GET /api/restaurants/:id/tables`
    async fn tables(&self, restaurant_id: i64) -> ClientResult<Vec<DiningTable>>;
    /// `GET /api/reservations`
    async fn reservations(&self) -> ClientResult<Vec<Reservation>>;
    /// `POST /api/reservations`
    async fn create_reservation(&self, req: &ReservationCreate) -> ClientResult<MessageResponse>;
    /// `PUT /api/reservations/:id`
    async fn update_reservation(
        &self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> ClientResult<MessageResponse>;
    /// `GET /api/orders`
    async fn orders(&self) -> ClientResult<Vec<Order>>;
    /// `PUT /api/orders/:id/status`
    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> ClientResult<MessageResponse>;

    /// Bind (or with `None`, unbind) the bearer credential for later calls
    fn set_token(&self, token: Option<String>);
    /// Currently bound bearer credential
    fn token(&self) -> Option<String>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkApiClient {
    client: Client,
    base_url: String,
    token: Arc<RwLock<Option<String>>>,
}

impl NetworkApiClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Base URL requests are resolved against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_header(&self) -> Option<String> {
        self.token.read().as_ref().map(|t| format!("Bearer {}", t))
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match self.auth_header() {
            Some(auth) => req.header(reqwest::header::AUTHORIZATION, auth),
            None => req,
        }
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        tracing::debug!(path, "GET");
        let req = self.authorize(self.client.get(self.url(path)));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "POST");
        let req = self.authorize(self.client.post(self.url(path)).json(body));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    /// Make a PUT request with JSON body
    pub async fn put<T: DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        tracing::debug!(path, "PUT");
        let req = self.authorize(self.client.put(self.url(path)).json(body));
        let response = req.send().await?;
        Self::handle_response(response).await
    }

    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await?;
            // Backend-reported message takes precedence
            if let Ok(body) = serde_json::from_str::<ApiErrorBody>(&text) {
                return Err(ClientError::Api {
                    status: status.as_u16(),
                    message: body.error,
                });
            }
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
                StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
                _ => Err(ClientError::Internal(text)),
            };
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::warn!(%status, "Undecodable response body: {}", e);
            ClientError::InvalidResponse(e.to_string())
        })
    }
}

#[async_trait]
impl RestaurantApi for NetworkApiClient {
    async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/api/login", &req).await
    }

    async fn restaurants(&self) -> ClientResult<Vec<Restaurant>> {
        self.get("/api/restaurants").await
    }

    async fn tables(&self, restaurant_id: i64) -> ClientResult<Vec<DiningTable>> {
        self.get(&format!("/api/restaurants/{}/tables", restaurant_id))
            .await
    }

    async fn reservations(&self) -> ClientResult<Vec<Reservation>> {
        self.get("/api/reservations").await
    }

    async fn create_reservation(&self, req: &ReservationCreate) -> ClientResult<MessageResponse> {
        self.post("/api/reservations", req).await
    }

    async fn update_reservation(
        &self,
        reservation_id: i64,
        status: ReservationStatus,
    ) -> ClientResult<MessageResponse> {
        self.put(
            &format!("/api/reservations/{}", reservation_id),
            &ReservationUpdate { status },
        )
        .await
    }

    async fn orders(&self) -> ClientResult<Vec<Order>> {
        self.get("/api/orders").await
    }

    async fn update_order_status(
        &self,
        order_id: i64,
        status: OrderStatus,
    ) -> ClientResult<MessageResponse> {
        self.put(
            &format!("/api/orders/{}/status", order_id),
            &OrderStatusUpdate { status },
        )
        .await
    }

    fn set_token(&self, token: Option<String>) {
        *self.token.write() = token;
    }

    fn token(&self) -> Option<String> {
        self.token.read().clone()
    }
}
