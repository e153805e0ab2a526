use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use kanau::processor::Processor;
use uuid::Uuid;

use ceats_core::entities::order_lines::ListLinesForOrder;
use ceats_core::entities::orders::GetOrderSummaryById;
use ceats_core::entities::status_history::ListHistoryForOrder;
use ceats_core::framework::DatabaseProcessor;

use super::{CustomerApiError, ensure_owned};
use crate::api::convert::order_detail_response;
use crate::api::extractors::CustomerAuth;
use crate::state::AppState;

/// `GET /orders/{id}` — full order detail for the status-tracking view.
///
/// This is the representation the customer polls every few seconds; it
/// always carries the line snapshots and the complete status history.
/// Only the order's owner may read it.
pub(super) async fn get_order(
    state: State<AppState>,
    CustomerAuth(user): CustomerAuth,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, CustomerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let order = processor
        .process(GetOrderSummaryById { order_id })
        .await
        .map_err(CustomerApiError::Database)?
        .ok_or(CustomerApiError::NotFound)?;

    ensure_owned(order.customer_id, user.id)?;

    let lines = processor
        .process(ListLinesForOrder { order_id })
        .await
        .map_err(CustomerApiError::Database)?;
    let history = processor
        .process(ListHistoryForOrder { order_id })
        .await
        .map_err(CustomerApiError::Database)?;

    Ok(Json(order_detail_response(&order, &lines, &history)))
}
