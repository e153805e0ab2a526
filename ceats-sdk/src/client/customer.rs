//! Customer API client (student-facing frontend → CampusEats server).
//!
//! Catalog browsing is public; everything touching orders requires the
//! bearer token obtained from `login`/`register`.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, parse_response};
use crate::objects::auth::{AuthResponse, LoginRequest, RegisterRequest};
use crate::objects::catalog::{CanteenResponse, MenuItemResponse};
use crate::objects::order::{CreateOrderRequest, OrderDetailResponse, OrderResponse};

/// Typed HTTP client for the customer-facing API.
#[derive(Debug, Clone)]
pub struct CustomerClient {
    http: Client,
    base_url: Url,
    token: Option<String>,
}

impl CustomerClient {
    /// Create an unauthenticated client (catalog browsing, login,
    /// registration).
    pub fn new(base_url: Url) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token: None,
        }
    }

    /// Attach the bearer token of a signed-in customer.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    fn bearer(&self) -> Result<&str, ClientError> {
        self.token.as_deref().ok_or(ClientError::MissingToken)
    }

    /// `POST /api/v1/auth/register` – create a customer account.
    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        let url = self.base_url.join("/api/v1/auth/register")?;
        let resp = self.http.post(url).json(req).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/auth/login` – exchange credentials for a token.
    pub async fn login(&self, req: &LoginRequest) -> Result<AuthResponse, ClientError> {
        let url = self.base_url.join("/api/v1/auth/login")?;
        let resp = self.http.post(url).json(req).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/canteens` – list open canteens.
    pub async fn list_canteens(&self) -> Result<Vec<CanteenResponse>, ClientError> {
        let url = self.base_url.join("/api/v1/canteens")?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/canteens/{id}` – canteen detail.
    pub async fn get_canteen(&self, canteen_id: Uuid) -> Result<CanteenResponse, ClientError> {
        let url = self.base_url.join(&format!("/api/v1/canteens/{canteen_id}"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/canteens/{id}/menu` – available menu items.
    pub async fn get_menu(&self, canteen_id: Uuid) -> Result<Vec<MenuItemResponse>, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/canteens/{canteen_id}/menu"))?;
        let resp = self.http.get(url).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/orders` – place an order (the consumed cart).
    ///
    /// On success the caller clears its cart and navigates to the
    /// status-tracking view for the returned order id.
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderResponse, ClientError> {
        let url = self.base_url.join("/api/v1/orders")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(self.bearer()?)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/orders` – own order history, newest first.
    pub async fn order_history(&self) -> Result<Vec<OrderResponse>, ClientError> {
        let url = self.base_url.join("/api/v1/orders")?;
        let resp = self.http.get(url).bearer_auth(self.bearer()?).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/orders/{id}` – full order detail with lines and
    /// status history. This is the endpoint the status view polls.
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderDetailResponse, ClientError> {
        let url = self.base_url.join(&format!("/api/v1/orders/{order_id}"))?;
        let resp = self.http.get(url).bearer_auth(self.bearer()?).send().await?;
        parse_response(resp).await
    }
}
