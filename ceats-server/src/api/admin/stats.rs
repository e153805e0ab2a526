use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::UserRole;
use ceats_core::entities::canteens::CountCanteens;
use ceats_core::entities::orders::{CountOrders, SumCompletedRevenue};
use ceats_core::entities::users::CountUsersByRole;
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::admin::AdminStatsResponse;

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::state::AppState;

/// `GET /admin/stats` — campus-wide dashboard numbers.
pub(super) async fn stats(
    state: State<AppState>,
    _auth: AdminAuth,
) -> Result<impl IntoResponse, AdminApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let canteen_count = processor
        .process(CountCanteens)
        .await
        .map_err(AdminApiError::Database)?;
    let customer_count = processor
        .process(CountUsersByRole {
            role: UserRole::Customer,
        })
        .await
        .map_err(AdminApiError::Database)?;
    let order_count = processor
        .process(CountOrders { canteen_id: None })
        .await
        .map_err(AdminApiError::Database)?;
    let total_revenue = processor
        .process(SumCompletedRevenue { canteen_id: None })
        .await
        .map_err(AdminApiError::Database)?;

    Ok(Json(AdminStatsResponse {
        canteen_count,
        customer_count,
        order_count,
        total_revenue,
    }))
}
