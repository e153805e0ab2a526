//! Menu CRUD, scoped to the manager's canteen.
//!
//! Deleting or re-pricing an item never touches existing orders; their
//! lines are frozen snapshots.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use kanau::processor::Processor;
use uuid::Uuid;

use ceats_core::entities::menu_items::{
    DeleteMenuItem, InsertMenuItem, ListMenuItemsForManager, UpdateMenuItem,
};
use ceats_core::framework::DatabaseProcessor;
use ceats_sdk::objects::catalog::UpsertMenuItemRequest;
use rust_decimal::Decimal;

use super::ManagerApiError;
use crate::api::convert::menu_item_response;
use crate::api::extractors::ManagerAuth;
use crate::state::AppState;

fn validate(body: &UpsertMenuItemRequest) -> Result<(), ManagerApiError> {
    if body.name.trim().is_empty() {
        return Err(ManagerApiError::Validation("item name is required".to_owned()));
    }
    if body.price < Decimal::ZERO {
        return Err(ManagerApiError::Validation("price cannot be negative".to_owned()));
    }
    Ok(())
}

/// `GET /manager/menu` — every item of the canteen, available or not.
pub(super) async fn list_menu(
    state: State<AppState>,
    auth: ManagerAuth,
) -> Result<impl IntoResponse, ManagerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let items = processor
        .process(ListMenuItemsForManager {
            canteen_id: auth.canteen_id,
        })
        .await
        .map_err(ManagerApiError::Database)?;

    let response: Vec<_> = items.iter().map(menu_item_response).collect();
    Ok(Json(response))
}

/// `POST /manager/menu` — add an item to the canteen's menu.
pub(super) async fn create_menu_item(
    state: State<AppState>,
    auth: ManagerAuth,
    Json(body): Json<UpsertMenuItemRequest>,
) -> Result<impl IntoResponse, ManagerApiError> {
    validate(&body)?;

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let item = processor
        .process(InsertMenuItem {
            canteen_id: auth.canteen_id,
            name: body.name,
            description: body.description,
            price: body.price,
            image_url: body.image_url,
            is_available: body.is_available,
        })
        .await
        .map_err(ManagerApiError::Database)?;

    Ok((StatusCode::CREATED, Json(menu_item_response(&item))))
}

/// `PUT /manager/menu/{id}` — replace an item. Answers 404 for items that
/// do not exist under this canteen.
pub(super) async fn update_menu_item(
    state: State<AppState>,
    auth: ManagerAuth,
    Path(item_id): Path<Uuid>,
    Json(body): Json<UpsertMenuItemRequest>,
) -> Result<impl IntoResponse, ManagerApiError> {
    validate(&body)?;

    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let item = processor
        .process(UpdateMenuItem {
            item_id,
            canteen_id: auth.canteen_id,
            name: body.name,
            description: body.description,
            price: body.price,
            image_url: body.image_url,
            is_available: body.is_available,
        })
        .await
        .map_err(ManagerApiError::Database)?
        .ok_or(ManagerApiError::NotFound("menu item not found"))?;

    Ok(Json(menu_item_response(&item)))
}

/// `DELETE /manager/menu/{id}` — remove an item from the menu.
pub(super) async fn delete_menu_item(
    state: State<AppState>,
    auth: ManagerAuth,
    Path(item_id): Path<Uuid>,
) -> Result<impl IntoResponse, ManagerApiError> {
    let processor = DatabaseProcessor {
        pool: state.db.clone(),
    };

    let deleted = processor
        .process(DeleteMenuItem {
            item_id,
            canteen_id: auth.canteen_id,
        })
        .await
        .map_err(ManagerApiError::Database)?;

    if !deleted {
        return Err(ManagerApiError::NotFound("menu item not found"));
    }

    Ok(StatusCode::NO_CONTENT)
}
