//! Canteen settings, scoped to the manager's canteen.

use axum::{Json, extract::State, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::canteens::{GetCanteenById, UpdateCanteen};
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::catalog::UpdateCanteenRequest;

use super::ManagerApiError;
use crate::api::convert::canteen_response;
use crate::api::extractors::ManagerAuth;
use crate::api::is_unique_violation;
use crate::state::AppState;

/// `GET /manager/canteen` — the canteen's current settings.
pub(super) async fn get_canteen(
    state: State<AppState>,
    auth: ManagerAuth,
) -> Result<impl IntoResponse, ManagerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let canteen = processor
        .process(GetCanteenById {
            canteen_id: auth.canteen_id,
        })
        .await
        .map_err(ManagerApiError::Database)?
        .ok_or(ManagerApiError::NotFound("canteen not found"))?;

    Ok(Json(canteen_response(&canteen)))
}

/// `PUT /manager/canteen` — update the canteen's settings. Fields absent
/// from the body keep their current value.
pub(super) async fn update_canteen(
    state: State<AppState>,
    auth: ManagerAuth,
    Json(body): Json<UpdateCanteenRequest>,
) -> Result<impl IntoResponse, ManagerApiError> {
    if body.name.as_deref().is_some_and(|n| n.trim().is_empty()) {
        return Err(ManagerApiError::Validation(
            "canteen name cannot be empty".to_owned(),
        ));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let canteen = processor
        .process(UpdateCanteen {
            canteen_id: auth.canteen_id,
            name: body.name,
            location: body.location,
            image_url: body.image_url,
            upi_id: body.upi_id,
            is_open: body.is_open,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                ManagerApiError::Conflict("canteen with this name already exists")
            } else {
                ManagerApiError::Database(e)
            }
        })?
        .ok_or(ManagerApiError::NotFound("canteen not found"))?;

    Ok(Json(canteen_response(&canteen)))
}
