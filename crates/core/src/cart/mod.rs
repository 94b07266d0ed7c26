//! Shopping cart with merge-on-add semantics.
//!
//! The cart is an ordered list of [`CartItem`]s serialized as one JSON array
//! into a single named slot of a [`CartStorage`] backend. Adding a product that
//! is already present bumps its quantity instead of creating a second line.
//!
//! Reads never fail: a missing slot, an unavailable backend, or a slot that no
//! longer parses all read back as an empty cart. Writes to an unavailable
//! backend are silently dropped.
//!
//! ```
//! use honey_palace_core::cart::{CartStore, MemoryStorage, ProductRef};
//! use honey_palace_core::Price;
//!
//! let mut cart = CartStore::new(MemoryStorage::new());
//! let honey = ProductRef::new("wildflower-1kg", "Wildflower Honey 1kg", Price::from_cents(1899));
//!
//! cart.add_to_cart(&honey, 2);
//! cart.add_one(&honey);
//!
//! let items = cart.get_cart();
//! assert_eq!(items.len(), 1);
//! assert_eq!(items[0].quantity, 3);
//! ```

mod item;
mod storage;
mod store;

pub use item::{CartItem, ProductRef};
pub use storage::{CART_SLOT, CartStorage, MemoryStorage, StorageError, UnavailableStorage};
pub use store::CartStore;
