use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use ceats_core::framework::DatabaseProcessor;
use ceats_core::orders::create_order as run_pipeline;
use ceats_sdk::objects::order::CreateOrderRequest;

use super::CustomerApiError;
use crate::api::convert::order_response;
use crate::api::extractors::CustomerAuth;
use crate::state::AppState;

/// `POST /orders` — turn the (client-consumed) cart into a priced order.
///
/// The request names catalog items by id; prices are snapshotted
/// server-side at this instant. On success the frontend clears its cart
/// and navigates to the status-tracking view.
pub(super) async fn create_order(
    state: State<AppState>,
    CustomerAuth(user): CustomerAuth,
    Json(body): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let order = run_pipeline(&processor, user.id, &body).await?;

    Ok((StatusCode::CREATED, Json(order_response(&order))))
}
