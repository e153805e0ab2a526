//! HTTP clients for the CampusEats APIs.
//!
//! Gated behind the `client` cargo feature so downstream crates that only
//! need the shared types do not pull in `reqwest`.

mod admin;
mod customer;
mod manager;
pub mod tracking;

pub use admin::AdminClient;
pub use customer::CustomerClient;
pub use manager::ManagerClient;

use reqwest::StatusCode;

use crate::objects::ErrorMessage;

/// Errors produced by the SDK HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("api error: status {status}, message: {message}")]
    Api { status: StatusCode, message: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// An authenticated endpoint was called on a client with no token.
    #[error("no bearer token set")]
    MissingToken,
}

impl ClientError {
    /// True when the server rejected the bearer token; the caller should
    /// clear its persisted session and return to login.
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ClientError::Api {
                status: StatusCode::UNAUTHORIZED,
                ..
            }
        )
    }
}

pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
) -> Result<T, ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        // Every error body is `{"message": …}`; fall back to the raw text
        // for anything that is not.
        let message = serde_json::from_str::<ErrorMessage>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(ClientError::Api { status, message });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(ClientError::Json)
}

pub(crate) async fn expect_no_content(resp: reqwest::Response) -> Result<(), ClientError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorMessage>(&body)
            .map(|e| e.message)
            .unwrap_or(body);
        return Err(ClientError::Api { status, message });
    }
    Ok(())
}
