use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::orders::{CountOrders, SumCompletedRevenue};
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::order::ManagerStatsResponse;

use super::ManagerApiError;
use crate::api::extractors::ManagerAuth;
use crate::state::AppState;

/// `GET /manager/stats` — dashboard numbers for the canteen: total order
/// count and revenue over completed orders.
pub(super) async fn stats(
    state: State<AppState>,
    auth: ManagerAuth,
) -> Result<impl IntoResponse, ManagerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let order_count = processor
        .process(CountOrders {
            canteen_id: Some(auth.canteen_id),
        })
        .await
        .map_err(ManagerApiError::Database)?;

    let total_revenue = processor
        .process(SumCompletedRevenue {
            canteen_id: Some(auth.canteen_id),
        })
        .await
        .map_err(ManagerApiError::Database)?;

    Ok(Json(ManagerStatsResponse {
        order_count,
        total_revenue,
    }))
}
