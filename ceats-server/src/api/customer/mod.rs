//! Customer order handlers.
//!
//! These endpoints are called by the student-facing frontend and require
//! a customer bearer token.
//!
//! # Endpoints
//!
//! - `POST /orders`      – Order creation pipeline entry point
//! - `GET  /orders`      – own order history
//! - `GET  /orders/{id}` – order + line items + status history (polled)

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use uuid::Uuid;

use ceats_core::orders::CreateOrderError;

use crate::api::error_response;
use crate::state::AppState;

mod create_order;
mod get_order;
mod list_orders;

/// Build the customer order router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/orders",
            post(create_order::create_order).get(list_orders::list_orders),
        )
        .route("/orders/{order_id}", get(get_order::get_order))
}

/// Errors that can occur in customer order handlers.
#[derive(Debug)]
pub(crate) enum CustomerApiError {
    /// Bad order-creation input; the message names what was wrong.
    Validation(String),
    /// The requested order does not exist.
    NotFound,
    /// The requested order belongs to someone else.
    NotOwned,
    Database(sqlx::Error),
}

impl From<CreateOrderError> for CustomerApiError {
    fn from(e: CreateOrderError) -> Self {
        match e {
            CreateOrderError::Database(db) => CustomerApiError::Database(db),
            // Everything else is user-correctable input; the error's own
            // message names the offending id.
            other => CustomerApiError::Validation(other.to_string()),
        }
    }
}

impl IntoResponse for CustomerApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            CustomerApiError::Validation(message) => {
                error_response(StatusCode::BAD_REQUEST, message)
            }
            CustomerApiError::NotFound => error_response(StatusCode::NOT_FOUND, "order not found"),
            CustomerApiError::NotOwned => error_response(StatusCode::FORBIDDEN, "not authorized"),
            CustomerApiError::Database(e) => {
                tracing::error!(error = %e, "customer API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}

/// Route-level sanity check shared by the two by-id handlers.
pub(crate) fn ensure_owned(order_customer: Uuid, caller: Uuid) -> Result<(), CustomerApiError> {
    if order_customer == caller {
        Ok(())
    } else {
        Err(CustomerApiError::NotOwned)
    }
}
