//! The client-held cart.
//!
//! A cart belongs to exactly one canteen at a time. It is mutated entirely
//! on the client, persisted synchronously on every change, and consumed at
//! checkout to build a `POST /orders` request; the server never sees the
//! cart itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::objects::catalog::MenuItemResponse;
use crate::objects::order::{CreateOrderRequest, OrderItemRequest, PaymentMethod};
use crate::storage::{StateStore, StateStoreError};

/// Storage key under which the cart is persisted.
pub const CART_STATE_KEY: &str = "campuseats-cart";

/// Errors produced by cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The cart already holds items from another canteen. The caller must
    /// abort or explicitly `clear()` first; the cart never mixes canteens
    /// on its own.
    #[error("cart already holds items from \"{in_cart}\"; clear it before ordering from \"{offered}\"")]
    CanteenMismatch { in_cart: String, offered: String },

    /// Checkout was attempted on an empty cart.
    #[error("cart is empty")]
    Empty,

    #[error(transparent)]
    Store(#[from] StateStoreError),
}

/// The canteen a cart is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanteenRef {
    pub id: Uuid,
    pub name: String,
    pub upi_id: Option<String>,
}

/// One line of the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub image_url: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct CartState {
    lines: Vec<CartLine>,
    canteen: Option<CanteenRef>,
}

/// Mutable cart bound to a [`StateStore`].
///
/// Every mutating operation persists the new state before returning, so a
/// restarted process picks up exactly where it left off.
pub struct CartManager<S: StateStore> {
    store: S,
    state: CartState,
}

impl<S: StateStore> CartManager<S> {
    /// Open the cart, restoring any previously persisted state.
    pub fn open(store: S) -> Result<Self, CartError> {
        let state = store.load_json(CART_STATE_KEY)?.unwrap_or_default();
        Ok(Self { store, state })
    }

    /// Add one unit of `item` from `canteen`.
    ///
    /// An empty cart adopts the canteen. A cart bound to a different
    /// canteen refuses with [`CartError::CanteenMismatch`] and is left
    /// untouched. Adding an item already in the cart increments its
    /// quantity by 1.
    pub fn add_item(&mut self, item: &MenuItemResponse, canteen: &CanteenRef) -> Result<(), CartError> {
        match &self.state.canteen {
            None => self.state.canteen = Some(canteen.clone()),
            Some(held) if held.id != canteen.id => {
                return Err(CartError::CanteenMismatch {
                    in_cart: held.name.clone(),
                    offered: canteen.name.clone(),
                });
            }
            Some(_) => {}
        }

        match self.state.lines.iter_mut().find(|l| l.item_id == item.id) {
            Some(line) => line.quantity += 1,
            None => self.state.lines.push(CartLine {
                item_id: item.id,
                name: item.name.clone(),
                price: item.price,
                image_url: item.image_url.clone(),
                quantity: 1,
            }),
        }

        self.persist()
    }

    /// Remove the line for `item_id`. The canteen association is cleared
    /// when the last line goes.
    pub fn remove_item(&mut self, item_id: Uuid) -> Result<(), CartError> {
        self.state.lines.retain(|l| l.item_id != item_id);
        if self.state.lines.is_empty() {
            self.state.canteen = None;
        }
        self.persist()
    }

    /// Set the quantity for `item_id`, clamped to a minimum of 1. Deleting
    /// a line goes through [`remove_item`](Self::remove_item), never
    /// through a zero quantity.
    pub fn update_quantity(&mut self, item_id: Uuid, quantity: u32) -> Result<(), CartError> {
        if let Some(line) = self.state.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity.max(1);
        }
        self.persist()
    }

    /// Empty the cart and drop the canteen association.
    pub fn clear(&mut self) -> Result<(), CartError> {
        self.state = CartState::default();
        self.persist()
    }

    /// `Σ price × quantity` over all lines. Derived, never stored.
    pub fn total(&self) -> Decimal {
        self.state
            .lines
            .iter()
            .map(|l| l.price * Decimal::from(l.quantity))
            .sum()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.state.lines
    }

    pub fn canteen(&self) -> Option<&CanteenRef> {
        self.state.canteen.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lines.is_empty()
    }

    /// Build the order-creation request that consumes this cart.
    ///
    /// The caller clears the cart after the server accepts the order.
    pub fn checkout_request(
        &self,
        payment_method: PaymentMethod,
    ) -> Result<CreateOrderRequest, CartError> {
        let canteen = self.state.canteen.as_ref().ok_or(CartError::Empty)?;
        if self.state.lines.is_empty() {
            return Err(CartError::Empty);
        }
        Ok(CreateOrderRequest {
            canteen_id: canteen.id,
            order_items: self
                .state
                .lines
                .iter()
                .map(|l| OrderItemRequest {
                    menu_item_id: l.item_id,
                    quantity: l.quantity,
                })
                .collect(),
            payment_method,
        })
    }

    fn persist(&self) -> Result<(), CartError> {
        self.store.save_json(CART_STATE_KEY, &self.state)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStateStore;

    fn canteen(name: &str) -> CanteenRef {
        CanteenRef {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            upi_id: None,
        }
    }

    fn item(canteen_id: Uuid, name: &str, cents: i64) -> MenuItemResponse {
        MenuItemResponse {
            id: Uuid::new_v4(),
            canteen_id,
            name: name.to_owned(),
            description: String::new(),
            price: Decimal::new(cents, 2),
            image_url: None,
            is_available: true,
        }
    }

    fn open_cart() -> CartManager<MemoryStateStore> {
        CartManager::open(MemoryStateStore::new()).unwrap()
    }

    #[test]
    fn empty_cart_adopts_the_first_canteen() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        cart.add_item(&item(nook.id, "Samosa", 100), &nook).unwrap();
        assert_eq!(cart.canteen().map(|c| c.id), Some(nook.id));
    }

    #[test]
    fn cross_canteen_add_is_refused_without_merging() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        let other = canteen("Juice Corner");
        cart.add_item(&item(nook.id, "Samosa", 100), &nook).unwrap();

        let err = cart
            .add_item(&item(other.id, "Juice", 250), &other)
            .unwrap_err();
        assert!(matches!(err, CartError::CanteenMismatch { .. }));

        // The cart still holds exactly one canteen's items.
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.canteen().map(|c| c.id), Some(nook.id));

        // After an explicit clear the other canteen is accepted.
        cart.clear().unwrap();
        cart.add_item(&item(other.id, "Juice", 250), &other).unwrap();
        assert_eq!(cart.canteen().map(|c| c.id), Some(other.id));
    }

    #[test]
    fn re_adding_an_item_increments_quantity() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        let samosa = item(nook.id, "Samosa", 100);
        cart.add_item(&samosa, &nook).unwrap();
        cart.add_item(&samosa, &nook).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 2);
    }

    #[test]
    fn removing_the_last_item_clears_the_canteen() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        let samosa = item(nook.id, "Samosa", 100);
        cart.add_item(&samosa, &nook).unwrap();
        cart.remove_item(samosa.id).unwrap();
        assert!(cart.is_empty());
        assert!(cart.canteen().is_none());
    }

    #[test]
    fn quantity_updates_clamp_to_one() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        let samosa = item(nook.id, "Samosa", 100);
        cart.add_item(&samosa, &nook).unwrap();
        cart.update_quantity(samosa.id, 0).unwrap();
        assert_eq!(cart.lines()[0].quantity, 1);
        cart.update_quantity(samosa.id, 4).unwrap();
        assert_eq!(cart.lines()[0].quantity, 4);
    }

    #[test]
    fn total_is_price_times_quantity() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        let samosa = item(nook.id, "Samosa", 100);
        let vada_pav = item(nook.id, "Vada Pav", 200);
        cart.add_item(&samosa, &nook).unwrap();
        cart.add_item(&vada_pav, &nook).unwrap();
        assert_eq!(cart.total(), Decimal::new(300, 2));
        cart.update_quantity(samosa.id, 3).unwrap();
        assert_eq!(cart.total(), Decimal::new(500, 2));
    }

    #[test]
    fn cart_state_survives_reopen() {
        let store = MemoryStateStore::new();
        let nook = canteen("The Nook");
        let samosa = item(nook.id, "Samosa", 100);
        {
            let mut cart = CartManager::open(&store).unwrap();
            cart.add_item(&samosa, &nook).unwrap();
        }
        let cart = CartManager::open(&store).unwrap();
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.canteen().map(|c| c.id), Some(nook.id));
    }

    #[test]
    fn checkout_request_mirrors_the_cart() {
        let mut cart = open_cart();
        let nook = canteen("The Nook");
        let samosa = item(nook.id, "Samosa", 100);
        cart.add_item(&samosa, &nook).unwrap();
        cart.add_item(&samosa, &nook).unwrap();

        let req = cart.checkout_request(PaymentMethod::Cash).unwrap();
        assert_eq!(req.canteen_id, nook.id);
        assert_eq!(req.order_items.len(), 1);
        assert_eq!(req.order_items[0].quantity, 2);
        assert!(matches!(
            open_cart().checkout_request(PaymentMethod::Cash),
            Err(CartError::Empty)
        ));
    }
}
