//! Manager API client (vendor dashboard → CampusEats server).
//!
//! Every endpoint requires a manager bearer token; the server scopes all
//! reads and writes to the canteen bound to that token.

use reqwest::Client;
use url::Url;
use uuid::Uuid;

use super::{ClientError, expect_no_content, parse_response};
use crate::objects::catalog::{
    CanteenResponse, MenuItemResponse, UpdateCanteenRequest, UpsertMenuItemRequest,
};
use crate::objects::order::{
    ManagerStatsResponse, OrderDetailResponse, OrderResponse, OrderStatus,
    UpdateOrderStatusRequest,
};

/// Typed HTTP client for the manager-facing API.
#[derive(Debug, Clone)]
pub struct ManagerClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl ManagerClient {
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            token: token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    /// `GET /api/v1/manager/orders` – the canteen's orders, newest first.
    pub async fn list_orders(&self) -> Result<Vec<OrderResponse>, ClientError> {
        let url = self.base_url.join("/api/v1/manager/orders")?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/manager/orders/{id}` – full order detail with lines.
    pub async fn get_order(&self, order_id: Uuid) -> Result<OrderDetailResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/manager/orders/{order_id}"))?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        parse_response(resp).await
    }

    /// `PATCH /api/v1/manager/orders/{id}/status` – drive the fulfillment
    /// state machine.
    pub async fn set_order_status(
        &self,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<OrderResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/manager/orders/{order_id}/status"))?;
        let resp = self
            .http
            .patch(url)
            .bearer_auth(&self.token)
            .json(&UpdateOrderStatusRequest { status })
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/manager/stats` – order count and completed revenue.
    pub async fn stats(&self) -> Result<ManagerStatsResponse, ClientError> {
        let url = self.base_url.join("/api/v1/manager/stats")?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/manager/menu` – the canteen's full menu, including
    /// unavailable items.
    pub async fn menu(&self) -> Result<Vec<MenuItemResponse>, ClientError> {
        let url = self.base_url.join("/api/v1/manager/menu")?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/manager/menu` – add a menu item.
    pub async fn create_menu_item(
        &self,
        req: &UpsertMenuItemRequest,
    ) -> Result<MenuItemResponse, ClientError> {
        let url = self.base_url.join("/api/v1/manager/menu")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `PUT /api/v1/manager/menu/{id}` – replace a menu item.
    pub async fn update_menu_item(
        &self,
        item_id: Uuid,
        req: &UpsertMenuItemRequest,
    ) -> Result<MenuItemResponse, ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/manager/menu/{item_id}"))?;
        let resp = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `DELETE /api/v1/manager/menu/{id}` – remove a menu item. Past
    /// order lines keep their snapshots.
    pub async fn delete_menu_item(&self, item_id: Uuid) -> Result<(), ClientError> {
        let url = self
            .base_url
            .join(&format!("/api/v1/manager/menu/{item_id}"))?;
        let resp = self.http.delete(url).bearer_auth(&self.token).send().await?;
        expect_no_content(resp).await
    }

    /// `GET /api/v1/manager/canteen` – the canteen's settings.
    pub async fn canteen(&self) -> Result<CanteenResponse, ClientError> {
        let url = self.base_url.join("/api/v1/manager/canteen")?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        parse_response(resp).await
    }

    /// `PUT /api/v1/manager/canteen` – update the canteen's settings.
    pub async fn update_canteen(
        &self,
        req: &UpdateCanteenRequest,
    ) -> Result<CanteenResponse, ClientError> {
        let url = self.base_url.join("/api/v1/manager/canteen")?;
        let resp = self
            .http
            .put(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }
}
