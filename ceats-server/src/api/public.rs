//! Public catalog handlers. No authentication required.
//!
//! # Endpoints
//!
//! - `GET /canteens`           – list open canteens
//! - `GET /canteens/{id}`      – canteen detail
//! - `GET /canteens/{id}/menu` – available menu items

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};
use kanau::processor::Processor;
use uuid::Uuid;

use ceats_core::entities::canteens::{GetCanteenById, ListOpenCanteens};
use ceats_core::entities::menu_items::ListAvailableMenuItems;
use ceats_core::framework::DatabaseProcessor;

use crate::api::convert::{canteen_response, menu_item_response};
use crate::api::error_response;
use crate::state::AppState;

/// Build the public catalog router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/canteens", get(list_canteens))
        .route("/canteens/{canteen_id}", get(get_canteen))
        .route("/canteens/{canteen_id}/menu", get(get_canteen_menu))
}

/// `GET /canteens` — canteens currently open for orders.
async fn list_canteens(state: State<AppState>) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let canteens = processor
        .process(ListOpenCanteens)
        .await
        .map_err(PublicApiError::Database)?;

    let response: Vec<_> = canteens.iter().map(canteen_response).collect();
    Ok(Json(response))
}

/// `GET /canteens/{id}` — canteen detail, open or not.
async fn get_canteen(
    state: State<AppState>,
    Path(canteen_id): Path<Uuid>,
) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let canteen = processor
        .process(GetCanteenById { canteen_id })
        .await
        .map_err(PublicApiError::Database)?
        .ok_or(PublicApiError::CanteenNotFound)?;

    Ok(Json(canteen_response(&canteen)))
}

/// `GET /canteens/{id}/menu` — the items customers can order right now.
async fn get_canteen_menu(
    state: State<AppState>,
    Path(canteen_id): Path<Uuid>,
) -> Result<impl IntoResponse, PublicApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let items = processor
        .process(ListAvailableMenuItems { canteen_id })
        .await
        .map_err(PublicApiError::Database)?;

    let response: Vec<_> = items.iter().map(menu_item_response).collect();
    Ok(Json(response))
}

/// Errors that can occur in public catalog handlers.
#[derive(Debug)]
enum PublicApiError {
    CanteenNotFound,
    Database(sqlx::Error),
}

impl IntoResponse for PublicApiError {
    fn into_response(self) -> axum::response::Response {
        match self {
            PublicApiError::CanteenNotFound => {
                error_response(StatusCode::NOT_FOUND, "canteen not found")
            }
            PublicApiError::Database(e) => {
                tracing::error!(error = %e, "public API database error");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        }
    }
}
