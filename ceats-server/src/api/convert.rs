//! Conversions from database models to API objects.

use ceats_sdk::objects::catalog::{CanteenResponse, MenuItemResponse};
use ceats_sdk::objects::order::{
    OrderDetailResponse, OrderLineResponse, OrderResponse, StatusHistoryEntry,
};

use ceats_core::entities::canteens::Canteen;
use ceats_core::entities::menu_items::MenuItem;
use ceats_core::entities::order_lines::OrderLine;
use ceats_core::entities::orders::{OrderRecord, OrderSummary};
use ceats_core::entities::status_history::StatusHistoryRow;

pub fn canteen_response(c: &Canteen) -> CanteenResponse {
    CanteenResponse {
        id: c.id,
        name: c.name.clone(),
        location: c.location.clone(),
        image_url: c.image_url.clone(),
        upi_id: c.upi_id.clone(),
        is_open: c.is_open,
    }
}

pub fn menu_item_response(m: &MenuItem) -> MenuItemResponse {
    MenuItemResponse {
        id: m.id,
        canteen_id: m.canteen_id,
        name: m.name.clone(),
        description: m.description.clone(),
        price: m.price,
        image_url: m.image_url.clone(),
        is_available: m.is_available,
    }
}

/// An order fresh out of a write path, before any joins are available.
pub fn order_response(o: &OrderRecord) -> OrderResponse {
    OrderResponse {
        id: o.id,
        customer_id: o.customer_id,
        customer_name: None,
        canteen_id: o.canteen_id,
        canteen_name: None,
        total_amount: o.total_amount,
        payment_method: o.payment_method.into(),
        payment_status: o.payment_status.into(),
        order_status: o.order_status.into(),
        created_at: o.created_at.assume_utc().unix_timestamp(),
    }
}

/// An order from a list query, with joined display names.
pub fn order_summary_response(o: &OrderSummary) -> OrderResponse {
    OrderResponse {
        id: o.id,
        customer_id: o.customer_id,
        customer_name: Some(o.customer_name.clone()),
        canteen_id: o.canteen_id,
        canteen_name: Some(o.canteen_name.clone()),
        total_amount: o.total_amount,
        payment_method: o.payment_method.into(),
        payment_status: o.payment_status.into(),
        order_status: o.order_status.into(),
        created_at: o.created_at.assume_utc().unix_timestamp(),
    }
}

/// The full representation the tracking views poll: order, line
/// snapshots, and the append-only history.
pub fn order_detail_response(
    order: &OrderSummary,
    lines: &[OrderLine],
    history: &[StatusHistoryRow],
) -> OrderDetailResponse {
    OrderDetailResponse {
        id: order.id,
        customer_id: order.customer_id,
        customer_name: Some(order.customer_name.clone()),
        canteen_id: order.canteen_id,
        canteen_name: Some(order.canteen_name.clone()),
        canteen_upi_id: order.canteen_upi_id.clone(),
        total_amount: order.total_amount,
        payment_method: order.payment_method.into(),
        payment_status: order.payment_status.into(),
        order_status: order.order_status.into(),
        created_at: order.created_at.assume_utc().unix_timestamp(),
        items: lines
            .iter()
            .map(|l| OrderLineResponse {
                menu_item_id: l.menu_item_id,
                name: l.name.clone(),
                price: l.price,
                quantity: l.quantity.max(0) as u32,
            })
            .collect(),
        status_history: history
            .iter()
            .map(|h| StatusHistoryEntry {
                status: h.status.into(),
                changed_at: h.changed_at.assume_utc().unix_timestamp(),
            })
            .collect(),
    }
}
