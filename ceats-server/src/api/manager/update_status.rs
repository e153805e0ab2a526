use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use ceats_core::entities::OrderStatus;
use ceats_core::framework::DatabaseProcessor;
use ceats_core::orders::set_status;
use ceats_sdk::objects::order::{OrderStatus as SdkOrderStatus, UpdateOrderStatusRequest};

use super::ManagerApiError;
use crate::api::convert::order_response;
use crate::api::extractors::ManagerAuth;
use crate::state::AppState;

/// `PATCH /manager/orders/{id}/status` — advance the order through the
/// fulfillment state machine.
///
/// Ownership, transition legality, and the concurrent-update guard all
/// live in the state machine itself; this handler only rules out
/// `pending`, which is not a requestable status.
pub(super) async fn update_status(
    state: State<AppState>,
    auth: ManagerAuth,
    Path(order_id): Path<Uuid>,
    Json(body): Json<UpdateOrderStatusRequest>,
) -> Result<impl IntoResponse, ManagerApiError> {
    if body.status == SdkOrderStatus::Pending {
        return Err(ManagerApiError::Validation("invalid status".to_owned()));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let updated = set_status(
        &processor,
        order_id,
        OrderStatus::from(body.status),
        auth.canteen_id,
    )
    .await?;

    Ok(Json(order_response(&updated)))
}
