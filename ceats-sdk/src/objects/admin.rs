//! Admin API request and response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request payload for `POST /admin/canteens`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateCanteenRequest {
    pub name: String,
    pub location: String,
    pub upi_id: Option<String>,
    pub image_url: Option<String>,
}

/// Request payload for `POST /admin/users/manager`. The canteen must
/// already exist; the new account is bound to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateManagerRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub canteen_id: Uuid,
}

/// Response for `POST /admin/users/manager`: the created account's
/// profile. No token is issued; the manager signs in with the password
/// chosen by the admin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManagerAccountResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: super::auth::Role,
    pub canteen_id: Uuid,
}

/// Response for `GET /admin/stats`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminStatsResponse {
    pub canteen_count: i64,
    pub customer_count: i64,
    pub order_count: i64,
    /// Sum of `total_amount` over completed orders, all canteens.
    pub total_revenue: Decimal,
}
