//! Admin API handlers.
//!
//! Requires an admin bearer token.
//!
//! # Endpoints
//!
//! - `POST /canteens`      – register a new canteen
//! - `POST /users/manager` – create a manager account bound to a canteen
//! - `GET  /stats`         – campus-wide counts and revenue

use axum::{
    Router,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::api::error_response;
use crate::state::AppState;

mod create_canteen;
mod create_manager;
mod stats;

/// Build the admin API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/canteens", post(create_canteen::create_canteen))
        .route("/users/manager", post(create_manager::create_manager))
        .route("/stats", get(stats::stats))
}

/// Errors that can occur in admin API handlers.
#[derive(Debug)]
pub(crate) enum AdminApiError {
    /// Bad input; the message names what was wrong.
    Validation(String),
    /// A unique field (canteen name, account email) is already taken.
    Conflict(&'static str),
    /// The referenced resource does not exist.
    NotFound(&'static str),
    Database(sqlx::Error),
    Internal(String),
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            AdminApiError::Validation(message) => error_response(StatusCode::BAD_REQUEST, message),
            AdminApiError::Conflict(message) => error_response(StatusCode::CONFLICT, message),
            AdminApiError::NotFound(message) => error_response(StatusCode::NOT_FOUND, message),
            AdminApiError::Database(e) => {
                tracing::error!(error = %e, "admin API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
            AdminApiError::Internal(e) => {
                tracing::error!(error = %e, "admin API internal error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
