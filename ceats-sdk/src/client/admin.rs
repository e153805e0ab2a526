//! Admin API client.

use reqwest::Client;
use url::Url;

use super::{ClientError, parse_response};
use crate::objects::admin::{
    AdminStatsResponse, CreateCanteenRequest, CreateManagerRequest, ManagerAccountResponse,
};
use crate::objects::catalog::CanteenResponse;

/// Typed HTTP client for the admin API.
#[derive(Debug, Clone)]
pub struct AdminClient {
    http: Client,
    base_url: Url,
    token: String,
}

impl AdminClient {
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

    /// `POST /api/v1/admin/canteens` – register a new canteen.
    pub async fn create_canteen(
        &self,
        req: &CreateCanteenRequest,
    ) -> Result<CanteenResponse, ClientError> {
        let url = self.base_url.join("/api/v1/admin/canteens")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `POST /api/v1/admin/users/manager` – create a manager account
    /// bound to a canteen.
    pub async fn create_manager(
        &self,
        req: &CreateManagerRequest,
    ) -> Result<ManagerAccountResponse, ClientError> {
        let url = self.base_url.join("/api/v1/admin/users/manager")?;
        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.token)
            .json(req)
            .send()
            .await?;
        parse_response(resp).await
    }

    /// `GET /api/v1/admin/stats` – campus-wide counts and revenue.
    pub async fn stats(&self) -> Result<AdminStatsResponse, ClientError> {
        let url = self.base_url.join("/api/v1/admin/stats")?;
        let resp = self.http.get(url).bearer_auth(&self.token).send().await?;
        parse_response(resp).await
    }
}
