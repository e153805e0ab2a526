//! Order request and response types.
//!
//! Orders and their line items are immutable snapshots once created; the
//! only fields that ever change afterwards are `order_status`,
//! `payment_status`, and the append-only status history.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How the customer intends to pay. Fixed at order creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    Cash,
}

/// Payment state of an order.
///
/// Cash orders are `Completed` from the moment of creation; UPI orders
/// start `Pending` and become `Completed` when fulfillment completes —
/// payment is inferred, never verified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

/// Fulfillment status for API responses.
///
/// This is the API/DTO version without `sqlx::Type`.
/// For database operations, use the version in `ceats-core::entities`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal orders never change again; pollers stop on them.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Accepted => write!(f, "accepted"),
            OrderStatus::Preparing => write!(f, "preparing"),
            OrderStatus::Ready => write!(f, "ready"),
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// One requested line in an order-creation request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub menu_item_id: Uuid,
    pub quantity: u32,
}

/// Request payload for `POST /orders`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub canteen_id: Uuid,
    pub order_items: Vec<OrderItemRequest>,
    pub payment_method: PaymentMethod,
}

/// Request payload for `PATCH /manager/orders/{id}/status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateOrderStatusRequest {
    pub status: OrderStatus,
}

/// Order summary as returned by list endpoints and order creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    /// Populated by list endpoints that join the customer record.
    pub customer_name: Option<String>,
    pub canteen_id: Uuid,
    /// Populated by list endpoints that join the canteen record.
    pub canteen_name: Option<String>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    /// Unix timestamp of when the order was created.
    pub created_at: i64,
}

/// A frozen catalog snapshot line belonging to an order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineResponse {
    pub menu_item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub quantity: u32,
}

/// One entry of the append-only status history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub status: OrderStatus,
    /// Unix timestamp of the transition.
    pub changed_at: i64,
}

/// Full order representation as returned by detail endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderDetailResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub customer_name: Option<String>,
    pub canteen_id: Uuid,
    pub canteen_name: Option<String>,
    /// The canteen's UPI VPA, when configured; used to build the payment
    /// deep link for UPI orders still awaiting payment.
    pub canteen_upi_id: Option<String>,
    pub total_amount: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub order_status: OrderStatus,
    pub created_at: i64,
    pub items: Vec<OrderLineResponse>,
    pub status_history: Vec<StatusHistoryEntry>,
}

/// Response for `GET /manager/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManagerStatsResponse {
    pub order_count: i64,
    /// Sum of `total_amount` over completed orders.
    pub total_revenue: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&OrderStatus::Preparing).unwrap();
        assert_eq!(json, "\"preparing\"");
        let back: OrderStatus = serde_json::from_str("\"cancelled\"").unwrap();
        assert_eq!(back, OrderStatus::Cancelled);
    }

    #[test]
    fn only_completed_and_cancelled_are_terminal() {
        assert!(OrderStatus::Completed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        for s in [
            OrderStatus::Pending,
            OrderStatus::Accepted,
            OrderStatus::Preparing,
            OrderStatus::Ready,
        ] {
            assert!(!s.is_terminal());
        }
    }
}
