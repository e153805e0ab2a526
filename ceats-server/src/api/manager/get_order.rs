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

use super::ManagerApiError;
use crate::api::convert::order_detail_response;
use crate::api::extractors::ManagerAuth;
use crate::state::AppState;

/// `GET /manager/orders/{id}` — full order detail with line items.
pub(super) async fn get_order(
    state: State<AppState>,
    auth: ManagerAuth,
    Path(order_id): Path<Uuid>,
) -> Result<impl IntoResponse, ManagerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let order = processor
        .process(GetOrderSummaryById { order_id })
        .await
        .map_err(ManagerApiError::Database)?
        .ok_or(ManagerApiError::NotFound("order not found"))?;

    if order.canteen_id != auth.canteen_id {
        return Err(ManagerApiError::NotOwned);
    }

    let lines = processor
        .process(ListLinesForOrder { order_id })
        .await
        .map_err(ManagerApiError::Database)?;
    let history = processor
        .process(ListHistoryForOrder { order_id })
        .await
        .map_err(ManagerApiError::Database)?;

    Ok(Json(order_detail_response(&order, &lines, &history)))
}
