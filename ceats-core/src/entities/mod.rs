pub mod canteens;
pub mod menu_items;
pub mod order_lines;
pub mod orders;
pub mod status_history;
pub mod users;

use ceats_sdk::objects::auth::Role as SdkRole;
use ceats_sdk::objects::order::{
    OrderStatus as SdkOrderStatus, PaymentMethod as SdkPaymentMethod,
    PaymentStatus as SdkPaymentStatus,
};

/// Fulfillment status for database operations.
///
/// This is the sqlx::Type version. For API/DTO use, see
/// `ceats_sdk::objects::order::OrderStatus`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "order_status")]
pub enum OrderStatus {
    Pending,
    Accepted,
    Preparing,
    Ready,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Terminal orders admit no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Cancelled)
    }
}

impl From<OrderStatus> for SdkOrderStatus {
    fn from(value: OrderStatus) -> Self {
        match value {
            OrderStatus::Pending => SdkOrderStatus::Pending,
            OrderStatus::Accepted => SdkOrderStatus::Accepted,
            OrderStatus::Preparing => SdkOrderStatus::Preparing,
            OrderStatus::Ready => SdkOrderStatus::Ready,
            OrderStatus::Completed => SdkOrderStatus::Completed,
            OrderStatus::Cancelled => SdkOrderStatus::Cancelled,
        }
    }
}

impl From<SdkOrderStatus> for OrderStatus {
    fn from(value: SdkOrderStatus) -> Self {
        match value {
            SdkOrderStatus::Pending => OrderStatus::Pending,
            SdkOrderStatus::Accepted => OrderStatus::Accepted,
            SdkOrderStatus::Preparing => OrderStatus::Preparing,
            SdkOrderStatus::Ready => OrderStatus::Ready,
            SdkOrderStatus::Completed => OrderStatus::Completed,
            SdkOrderStatus::Cancelled => OrderStatus::Cancelled,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        SdkOrderStatus::from(*self).fmt(f)
    }
}

/// Payment status for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "payment_status")]
pub enum PaymentStatus {
    Pending,
    Completed,
    Failed,
}

impl From<PaymentStatus> for SdkPaymentStatus {
    fn from(value: PaymentStatus) -> Self {
        match value {
            PaymentStatus::Pending => SdkPaymentStatus::Pending,
            PaymentStatus::Completed => SdkPaymentStatus::Completed,
            PaymentStatus::Failed => SdkPaymentStatus::Failed,
        }
    }
}

impl From<SdkPaymentStatus> for PaymentStatus {
    fn from(value: SdkPaymentStatus) -> Self {
        match value {
            SdkPaymentStatus::Pending => PaymentStatus::Pending,
            SdkPaymentStatus::Completed => PaymentStatus::Completed,
            SdkPaymentStatus::Failed => PaymentStatus::Failed,
        }
    }
}

/// Payment method for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "payment_method")]
pub enum PaymentMethod {
    Upi,
    Cash,
}

impl PaymentMethod {
    /// Payment state a freshly created order starts in. Cash is treated as
    /// settled immediately; the money changes hands at the counter but is
    /// never gated on.
    pub fn initial_payment_status(self) -> PaymentStatus {
        match self {
            PaymentMethod::Cash => PaymentStatus::Completed,
            PaymentMethod::Upi => PaymentStatus::Pending,
        }
    }
}

impl From<PaymentMethod> for SdkPaymentMethod {
    fn from(value: PaymentMethod) -> Self {
        match value {
            PaymentMethod::Upi => SdkPaymentMethod::Upi,
            PaymentMethod::Cash => SdkPaymentMethod::Cash,
        }
    }
}

impl From<SdkPaymentMethod> for PaymentMethod {
    fn from(value: SdkPaymentMethod) -> Self {
        match value {
            SdkPaymentMethod::Upi => PaymentMethod::Upi,
            SdkPaymentMethod::Cash => PaymentMethod::Cash,
        }
    }
}

/// Account role for database operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, sqlx::Type)]
#[sqlx(rename_all = "lowercase", type_name = "user_role")]
pub enum UserRole {
    Customer,
    Manager,
    Admin,
}

impl From<UserRole> for SdkRole {
    fn from(value: UserRole) -> Self {
        match value {
            UserRole::Customer => SdkRole::Customer,
            UserRole::Manager => SdkRole::Manager,
            UserRole::Admin => SdkRole::Admin,
        }
    }
}

impl From<SdkRole> for UserRole {
    fn from(value: SdkRole) -> Self {
        match value {
            SdkRole::Customer => UserRole::Customer,
            SdkRole::Manager => UserRole::Manager,
            SdkRole::Admin => UserRole::Admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cash_orders_start_with_payment_completed() {
        assert_eq!(
            PaymentMethod::Cash.initial_payment_status(),
            PaymentStatus::Completed
        );
    }

    #[test]
    fn upi_orders_start_with_payment_pending() {
        assert_eq!(
            PaymentMethod::Upi.initial_payment_status(),
            PaymentStatus::Pending
        );
    }
}
