use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::orders::ListOrdersForCanteen;
use ceats_core::framework::DatabaseProcessor;

use super::ManagerApiError;
use crate::api::convert::order_summary_response;
use crate::api::extractors::ManagerAuth;
use crate::state::AppState;

/// `GET /manager/orders` — the canteen's orders, newest first.
///
/// The vendor dashboard polls this list; when it disagrees with the
/// detail the dashboard holds open, the client re-fetches that order.
pub(super) async fn list_orders(
    state: State<AppState>,
    auth: ManagerAuth,
) -> Result<impl IntoResponse, ManagerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let orders = processor
        .process(ListOrdersForCanteen {
            canteen_id: auth.canteen_id,
        })
        .await
        .map_err(ManagerApiError::Database)?;

    let response: Vec<_> = orders.iter().map(order_summary_response).collect();
    Ok(Json(response))
}
