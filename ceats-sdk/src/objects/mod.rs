//! API request and response objects shared between server and clients.
//!
//! Enums here are the API/DTO versions without `sqlx::Type`. For database
//! operations, see the versions in `ceats-core::entities`.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod order;

pub use admin::{
    AdminStatsResponse, CreateCanteenRequest, CreateManagerRequest, ManagerAccountResponse,
};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, Role};
pub use catalog::{
    CanteenResponse, MenuItemResponse, UpdateCanteenRequest, UpsertMenuItemRequest, upi_pay_link,
};
pub use order::{
    CreateOrderRequest, ManagerStatsResponse, OrderDetailResponse, OrderItemRequest,
    OrderLineResponse, OrderResponse, OrderStatus, PaymentMethod, PaymentStatus,
    StatusHistoryEntry, UpdateOrderStatusRequest,
};

use serde::{Deserialize, Serialize};

/// Uniform error body carried by every non-2xx API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

impl ErrorMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
