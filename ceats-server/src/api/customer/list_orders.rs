use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::orders::ListOrdersForCustomer;
use ceats_core::framework::DatabaseProcessor;

use super::CustomerApiError;
use crate::api::convert::order_summary_response;
use crate::api::extractors::CustomerAuth;
use crate::state::AppState;

/// `GET /orders` — the caller's order history, newest first.
pub(super) async fn list_orders(
    state: State<AppState>,
    CustomerAuth(user): CustomerAuth,
) -> Result<impl IntoResponse, CustomerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let orders = processor
        .process(ListOrdersForCustomer {
            customer_id: user.id,
        })
        .await
        .map_err(CustomerApiError::Database)?;

    let response: Vec<_> = orders.iter().map(order_summary_response).collect();
    Ok(Json(response))
}
