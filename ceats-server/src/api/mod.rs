//! HTTP API surface, mounted under `/api/v1`.
//!
//! Four areas share one error convention: every non-2xx response carries a
//! `{"message": …}` body, authorization failures say nothing beyond "not
//! authorized", and unexpected failures log the cause and answer with a
//! generic 500.

pub mod admin;
pub mod auth;
pub mod convert;
pub mod customer;
pub mod extractors;
pub mod manager;
pub mod public;

use axum::Router;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use ceats_sdk::objects::ErrorMessage;

use crate::state::AppState;

/// Build the `/api/v1` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .merge(public::router())
        .merge(customer::router())
        .nest("/manager", manager::router())
        .nest("/admin", admin::router())
}

/// Build the uniform `{"message": …}` error response.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, axum::Json(ErrorMessage::new(message))).into_response()
}

/// True when the database rejected a write because of a unique
/// constraint (duplicate canteen name, duplicate account email, …).
pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db) if db.is_unique_violation())
}
