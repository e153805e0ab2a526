use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::canteens::InsertCanteen;
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::admin::CreateCanteenRequest;

use super::AdminApiError;
use crate::api::convert::canteen_response;
use crate::api::extractors::AdminAuth;
use crate::api::is_unique_violation;
use crate::state::AppState;

/// `POST /admin/canteens` — register a new canteen. Names are unique
/// across campus.
pub(super) async fn create_canteen(
    state: State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<CreateCanteenRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    if body.name.trim().is_empty() || body.location.trim().is_empty() {
        return Err(AdminApiError::Validation(
            "name and location are required".to_owned(),
        ));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let canteen = processor
        .process(InsertCanteen {
            name: body.name,
            location: body.location,
            image_url: body.image_url,
            upi_id: body.upi_id,
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AdminApiError::Conflict("canteen with this name already exists")
            } else {
                AdminApiError::Database(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(canteen_response(&canteen))))
}
