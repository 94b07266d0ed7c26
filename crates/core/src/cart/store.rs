//! The cart store: line-item logic over a single persisted slot.

use super::item::{CartItem, ProductRef};
use super::storage::{CART_SLOT, CartStorage};
use crate::types::Price;

/// Cart operations over an injected [`CartStorage`].
///
/// Every mutating call reads the slot, applies its change, and writes the whole
/// list back. There is no locking: two writers sharing one slot can overwrite
/// each other.
#[derive(Debug, Clone, Default)]
pub struct CartStore<S> {
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Create a cart store over `storage`.
    #[must_use]
    pub const fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Borrow the storage backend.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the storage backend.
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// The persisted line items, in insertion order.
    ///
    /// Returns an empty list when nothing is stored, when storage is
    /// unavailable, or when the stored value is not a valid cart.
    #[must_use]
    pub fn get_cart(&self) -> Vec<CartItem> {
        if !self.storage.is_available() {
            return Vec::new();
        }
        match self.storage.get_item(CART_SLOT) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_default(),
            Ok(None) | Err(_) => Vec::new(),
        }
    }

    /// Add a single unit of `product`.
    pub fn add_one(&mut self, product: &ProductRef) {
        self.add_to_cart(product, 1);
    }

    /// Add `quantity` units of `product`.
    ///
    /// If a line with the product's identifier exists its quantity grows by
    /// `quantity` (saturating at `u32::MAX`); otherwise a new line is appended.
    /// A product without an identifier always appends a new line.
    pub fn add_to_cart(&mut self, product: &ProductRef, quantity: u32) {
        if !self.storage.is_available() {
            return;
        }

        let mut cart = self.get_cart();
        let existing = product
            .identifier()
            .and_then(|id| cart.iter_mut().find(|item| item.matches(id)));

        match existing {
            Some(item) => item.quantity = item.quantity.saturating_add(quantity),
            None => cart.push(CartItem::from_product(product, quantity)),
        }

        self.persist(&cart);
    }

    /// Set the quantity of the line for `id`; zero removes the line.
    ///
    /// Returns `false` if no line matches.
    pub fn update_quantity(&mut self, id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_from_cart(id);
        }

        let mut cart = self.get_cart();
        let Some(item) = cart.iter_mut().find(|item| item.matches(id)) else {
            return false;
        };
        item.quantity = quantity;
        self.persist(&cart);
        true
    }

    /// Remove the line for `id`. Returns `false` if no line matches.
    pub fn remove_from_cart(&mut self, id: &str) -> bool {
        let mut cart = self.get_cart();
        let before = cart.len();
        cart.retain(|item| !item.matches(id));
        if cart.len() == before {
            return false;
        }
        self.persist(&cart);
        true
    }

    /// Drop the slot entirely.
    pub fn clear_cart(&mut self) {
        if self.storage.is_available() {
            let _ = self.storage.remove_item(CART_SLOT);
        }
    }

    /// Total units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.get_cart()
            .iter()
            .fold(0, |acc, item| acc.saturating_add(item.quantity))
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.get_cart().iter().map(CartItem::line_total).sum()
    }

    fn persist(&mut self, cart: &[CartItem]) {
        if let Ok(raw) = serde_json::to_string(cart) {
            let _ = self.storage.set_item(CART_SLOT, raw);
        }
    }
}
