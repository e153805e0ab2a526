//! The order creation pipeline.
//!
//! A checkout request names catalog items by id; this module resolves them
//! in one batched lookup, snapshots their current name and price, computes
//! the total, and writes order, lines, and the initial `pending` history
//! entry as a single transaction. Any unresolvable id fails the whole
//! request — there are no partial orders.

use itertools::Itertools;
use kanau::processor::Processor;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;
use uuid::Uuid;

use ceats_sdk::objects::order::{CreateOrderRequest, OrderItemRequest};

use crate::entities::menu_items::{GetMenuItemsByIds, MenuItem};
use crate::entities::order_lines::{NewOrderLine, OrderLine};
use crate::entities::orders::OrderRecord;
use crate::entities::status_history::StatusHistoryRow;
use crate::entities::{OrderStatus, PaymentMethod};
use crate::framework::DatabaseProcessor;

/// Errors produced by the order creation pipeline.
#[derive(Debug, Error)]
pub enum CreateOrderError {
    /// The request carried no items.
    #[error("no order items")]
    EmptyOrder,

    /// A requested quantity was zero (or overflowed the line type).
    #[error("invalid quantity for menu item {0}")]
    InvalidQuantity(Uuid),

    /// The named canteen does not exist.
    #[error("canteen {0} not found")]
    UnknownCanteen(Uuid),

    /// An item id did not resolve against the catalog.
    #[error("menu item {0} not found")]
    UnknownMenuItem(Uuid),

    /// An item resolved, but belongs to a different canteen than the
    /// order names.
    #[error("menu item {0} does not belong to the ordered canteen")]
    ForeignMenuItem(Uuid),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Resolve the requested items against the catalog rows and price the
/// order.
///
/// Pure: all catalog access happens before this is called. Duplicate ids
/// in the request produce one line each, exactly as requested.
pub fn build_lines(
    canteen_id: Uuid,
    requested: &[OrderItemRequest],
    catalog: &[MenuItem],
) -> Result<(Vec<NewOrderLine>, Decimal), CreateOrderError> {
    if requested.is_empty() {
        return Err(CreateOrderError::EmptyOrder);
    }

    let mut lines = Vec::with_capacity(requested.len());
    for item in requested {
        let row = catalog
            .iter()
            .find(|m| m.id == item.menu_item_id)
            .ok_or(CreateOrderError::UnknownMenuItem(item.menu_item_id))?;
        if row.canteen_id != canteen_id {
            return Err(CreateOrderError::ForeignMenuItem(item.menu_item_id));
        }
        let quantity = i32::try_from(item.quantity)
            .ok()
            .filter(|q| *q >= 1)
            .ok_or(CreateOrderError::InvalidQuantity(item.menu_item_id))?;
        lines.push(NewOrderLine {
            menu_item_id: row.id,
            name: row.name.clone(),
            price: row.price,
            quantity,
        });
    }

    let total = lines.iter().map(NewOrderLine::subtotal).sum();
    Ok((lines, total))
}

/// Run the full pipeline for `customer_id` and return the created order.
///
/// Order, lines, and the initial `pending` history entry commit together
/// or not at all; a failure partway leaves nothing customer-visible
/// behind.
pub async fn create_order(
    processor: &DatabaseProcessor,
    customer_id: Uuid,
    request: &CreateOrderRequest,
) -> Result<OrderRecord, CreateOrderError> {
    if request.order_items.is_empty() {
        return Err(CreateOrderError::EmptyOrder);
    }

    let item_ids: Vec<Uuid> = request
        .order_items
        .iter()
        .map(|i| i.menu_item_id)
        .unique()
        .collect();
    let catalog = processor.process(GetMenuItemsByIds { item_ids }).await?;

    let (lines, total_amount) = build_lines(request.canteen_id, &request.order_items, &catalog)?;

    let payment_method = PaymentMethod::from(request.payment_method);

    let mut tx = processor.pool.begin().await?;

    let order = OrderRecord::insert_tx(
        &mut tx,
        customer_id,
        request.canteen_id,
        total_amount,
        payment_method,
    )
    .await
    .map_err(|e| match &e {
        // The canteen id is a foreign key; an unknown canteen fails the
        // insert rather than a separate pre-check.
        sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
            CreateOrderError::UnknownCanteen(request.canteen_id)
        }
        _ => CreateOrderError::Database(e),
    })?;

    OrderLine::insert_many_tx(&mut tx, order.id, &lines).await?;
    StatusHistoryRow::append_tx(&mut tx, order.id, OrderStatus::Pending).await?;

    tx.commit().await?;

    info!(
        order_id = %order.id,
        canteen_id = %order.canteen_id,
        total = %order.total_amount,
        lines = lines.len(),
        "order created"
    );

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn menu_item(canteen_id: Uuid, name: &str, cents: i64) -> MenuItem {
        MenuItem {
            id: Uuid::new_v4(),
            canteen_id,
            name: name.to_owned(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            image_url: None,
            is_available: true,
            created_at: datetime!(2025-01-01 12:00),
        }
    }

    fn want(item: &MenuItem, quantity: u32) -> OrderItemRequest {
        OrderItemRequest {
            menu_item_id: item.id,
            quantity,
        }
    }

    #[test]
    fn empty_request_is_rejected() {
        let canteen = Uuid::new_v4();
        assert!(matches!(
            build_lines(canteen, &[], &[]),
            Err(CreateOrderError::EmptyOrder)
        ));
    }

    #[test]
    fn total_is_the_sum_of_snapshot_prices() {
        // The Nook: Samosa $1.00 ×1, Vada Pav $2.00 ×1 → $3.00.
        let canteen = Uuid::new_v4();
        let samosa = menu_item(canteen, "Samosa", 100);
        let vada_pav = menu_item(canteen, "Vada Pav", 200);
        let catalog = vec![samosa.clone(), vada_pav.clone()];

        let (lines, total) =
            build_lines(canteen, &[want(&samosa, 1), want(&vada_pav, 1)], &catalog).unwrap();
        assert_eq!(total, Decimal::new(300, 2));
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0].name, "Samosa");
        assert_eq!(lines[0].price, Decimal::new(100, 2));
    }

    #[test]
    fn quantities_multiply_into_the_total() {
        let canteen = Uuid::new_v4();
        let samosa = menu_item(canteen, "Samosa", 150);
        let catalog = vec![samosa.clone()];

        let (lines, total) = build_lines(canteen, &[want(&samosa, 4)], &catalog).unwrap();
        assert_eq!(total, Decimal::new(600, 2));
        assert_eq!(lines[0].quantity, 4);
    }

    #[test]
    fn one_unresolvable_id_fails_the_whole_order() {
        let canteen = Uuid::new_v4();
        let samosa = menu_item(canteen, "Samosa", 100);
        let catalog = vec![samosa.clone()];
        let ghost = OrderItemRequest {
            menu_item_id: Uuid::new_v4(),
            quantity: 1,
        };

        let err = build_lines(canteen, &[want(&samosa, 1), ghost.clone()], &catalog).unwrap_err();
        match err {
            CreateOrderError::UnknownMenuItem(id) => assert_eq!(id, ghost.menu_item_id),
            other => panic!("expected UnknownMenuItem, got {other:?}"),
        }
    }

    #[test]
    fn items_from_another_canteen_are_rejected() {
        let canteen = Uuid::new_v4();
        let foreign = menu_item(Uuid::new_v4(), "Juice", 250);
        let catalog = vec![foreign.clone()];

        let err = build_lines(canteen, &[want(&foreign, 1)], &catalog).unwrap_err();
        assert!(matches!(err, CreateOrderError::ForeignMenuItem(id) if id == foreign.id));
    }

    #[test]
    fn zero_quantity_is_rejected() {
        let canteen = Uuid::new_v4();
        let samosa = menu_item(canteen, "Samosa", 100);
        let catalog = vec![samosa.clone()];

        let err = build_lines(canteen, &[want(&samosa, 0)], &catalog).unwrap_err();
        assert!(matches!(err, CreateOrderError::InvalidQuantity(_)));
    }

    #[test]
    fn later_catalog_price_changes_do_not_reprice_lines() {
        let canteen = Uuid::new_v4();
        let mut samosa = menu_item(canteen, "Samosa", 100);
        let catalog_at_checkout = vec![samosa.clone()];

        let (lines, total) = build_lines(canteen, &[want(&samosa, 2)], &catalog_at_checkout).unwrap();

        // The canteen re-prices afterwards; the snapshot keeps the old price.
        samosa.price = Decimal::new(500, 2);
        assert_eq!(lines[0].price, Decimal::new(100, 2));
        assert_eq!(total, Decimal::new(200, 2));
    }
}
