use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use kanau::processor::Processor;

use ceats_core::entities::UserRole;
use ceats_core::entities::canteens::GetCanteenById;
use ceats_core::entities::users::{InsertUser, hash_password};
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::admin::{CreateManagerRequest, ManagerAccountResponse};

use super::AdminApiError;
use crate::api::extractors::AdminAuth;
use crate::api::is_unique_violation;
use crate::state::AppState;

/// `POST /admin/users/manager` — create a manager account bound to an
/// existing canteen. The canteen id inside the resulting bearer tokens is
/// what scopes every `/manager` request this account makes.
pub(super) async fn create_manager(
    state: State<AppState>,
    _auth: AdminAuth,
    Json(body): Json<CreateManagerRequest>,
) -> Result<impl IntoResponse, AdminApiError> {
    if body.name.trim().is_empty() || body.email.trim().is_empty() || body.password.is_empty() {
        return Err(AdminApiError::Validation(
            "name, email and password are required".to_owned(),
        ));
    }

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    processor
        .process(GetCanteenById {
            canteen_id: body.canteen_id,
        })
        .await
        .map_err(AdminApiError::Database)?
        .ok_or(AdminApiError::NotFound("canteen not found"))?;

    let password_hash =
        hash_password(&body.password).map_err(|e| AdminApiError::Internal(e.to_string()))?;

    let user = processor
        .process(InsertUser {
            name: body.name,
            email: body.email,
            password_hash,
            role: UserRole::Manager,
            canteen_id: Some(body.canteen_id),
        })
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AdminApiError::Conflict("user with this email already exists")
            } else {
                AdminApiError::Database(e)
            }
        })?;

    Ok((
        StatusCode::CREATED,
        Json(ManagerAccountResponse {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role.into(),
            canteen_id: body.canteen_id,
        }),
    ))
}
