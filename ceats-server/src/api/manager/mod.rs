//! Manager (vendor staff) API handlers.
//!
//! Every endpoint requires a manager bearer token; the canteen bound to
//! that token scopes all reads and writes. Orders of other canteens
//! answer 403 with nothing but "not authorized".
//!
//! # Endpoints
//!
//! - `GET   /orders`             – the canteen's orders (polled by the dashboard)
//! - `GET   /orders/{id}`        – order + line items + status history
//! - `PATCH /orders/{id}/status` – drive the fulfillment state machine
//! - `GET   /stats`              – order count and completed revenue
//! - `GET   /menu`, `POST /menu`, `PUT/DELETE /menu/{id}` – menu CRUD
//! - `GET   /canteen`, `PUT /canteen` – canteen settings

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, put},
};

use ceats_core::orders::StatusError;

use crate::api::error_response;
use crate::state::AppState;

mod canteen;
mod get_order;
mod list_orders;
mod menu;
mod stats;
mod update_status;

/// Build the manager API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders::list_orders))
        .route("/orders/{order_id}", get(get_order::get_order))
        .route(
            "/orders/{order_id}/status",
            patch(update_status::update_status),
        )
        .route("/stats", get(stats::stats))
        .route("/menu", get(menu::list_menu).post(menu::create_menu_item))
        .route(
            "/menu/{item_id}",
            put(menu::update_menu_item).delete(menu::delete_menu_item),
        )
        .route(
            "/canteen",
            get(canteen::get_canteen).put(canteen::update_canteen),
        )
}

/// Errors that can occur in manager API handlers.
#[derive(Debug)]
pub(crate) enum ManagerApiError {
    /// Bad input; the message names what was wrong.
    Validation(String),
    /// The target resource does not exist (under this canteen, for
    /// menu items).
    NotFound(&'static str),
    /// The target order belongs to another canteen.
    NotOwned,
    /// The requested move is not a legal state-machine transition.
    IllegalTransition(String),
    /// The order changed under a concurrent request; re-read and retry.
    Conflict(&'static str),
    Database(sqlx::Error),
}

impl From<StatusError> for ManagerApiError {
    fn from(e: StatusError) -> Self {
        match e {
            StatusError::NotFound(_) => ManagerApiError::NotFound("order not found"),
            StatusError::NotOwned => ManagerApiError::NotOwned,
            StatusError::IllegalTransition { .. } => {
                ManagerApiError::IllegalTransition(e.to_string())
            }
            StatusError::Conflict => ManagerApiError::Conflict("order was updated concurrently"),
            StatusError::Database(db) => ManagerApiError::Database(db),
        }
    }
}

impl IntoResponse for ManagerApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            ManagerApiError::Validation(message) => {
                error_response(StatusCode::BAD_REQUEST, message)
            }
            ManagerApiError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
            ManagerApiError::NotOwned => error_response(StatusCode::FORBIDDEN, "not authorized"),
            ManagerApiError::IllegalTransition(message) => {
                error_response(StatusCode::UNPROCESSABLE_ENTITY, message)
            }
            ManagerApiError::Conflict(message) => error_response(StatusCode::CONFLICT, message),
            ManagerApiError::Database(e) => {
                tracing::error!(error = %e, "manager API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
