//! Canteen and menu catalog types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;

/// A food vendor as returned by the public catalog endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanteenResponse {
    pub id: Uuid,
    pub name: String,
    pub location: String,
    pub image_url: Option<String>,
    /// UPI VPA used to build payment deep links; never verified.
    pub upi_id: Option<String>,
    pub is_open: bool,
}

/// A single menu item.
///
/// `is_available` is informational: it filters what customers see but is
/// not enforced at order time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItemResponse {
    pub id: Uuid,
    pub canteen_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Request payload for creating or replacing a menu item
/// (`POST /manager/menu`, `PUT /manager/menu/{id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertMenuItemRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub is_available: bool,
}

/// Request payload for `PUT /manager/canteen`. Absent fields are left
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateCanteenRequest {
    pub name: Option<String>,
    pub location: Option<String>,
    pub image_url: Option<String>,
    pub upi_id: Option<String>,
    pub is_open: Option<bool>,
}

/// Build a `upi://pay` deep link for paying `amount` to the given VPA.
///
/// The link opens the user's payment app with the payee and amount
/// pre-filled; whether the payment actually happens is never verified by
/// this system.
pub fn upi_pay_link(upi_id: &str, payee_name: &str, amount: Decimal) -> Result<Url, url::ParseError> {
    let mut url = Url::parse("upi://pay")?;
    url.query_pairs_mut()
        .append_pair("pa", upi_id)
        .append_pair("pn", payee_name)
        .append_pair("am", &amount.to_string())
        .append_pair("cu", "INR");
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn upi_link_carries_payee_and_amount() {
        let url = upi_pay_link("nook@upi", "The Nook", Decimal::new(300, 2)).unwrap();
        assert_eq!(url.scheme(), "upi");
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&("pa".into(), "nook@upi".into())));
        assert!(pairs.contains(&("pn".into(), "The Nook".into())));
        assert!(pairs.contains(&("am".into(), "3.00".into())));
        assert!(pairs.contains(&("cu".into(), "INR".into())));
    }
}
