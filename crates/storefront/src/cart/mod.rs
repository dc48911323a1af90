//! Session-scoped shopping cart.
//!
//! [`CartStore`] is the single owner of cart mutation. Views get a read-only
//! projection through [`CartStore::items`] and [`CartStore::contains`].
//! Every change to the collection bumps a revision counter, which is how
//! [`CartQuantities`] notices that the cart it was built for is gone.
//!
//! The store lives in the visitor's session: it starts empty with the
//! session and disappears with it.

mod quantities;

pub use quantities::CartQuantities;

use eshop_core::{CartItem, Product, ProductId};
use serde::{Deserialize, Serialize};

/// The visitor's cart.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartStore {
    items: Vec<CartItem>,
    revision: u64,
}

impl CartStore {
    /// An empty cart.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cart lines in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Whether a product is in the cart.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.items.iter().any(|item| item.id == id)
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Identifies the current collection; changes on every effective mutation.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    /// Append a product unless it is already in the cart.
    ///
    /// Returns whether the cart changed.
    pub fn add_to_cart(&mut self, product: Product) -> bool {
        if self.contains(product.id) {
            return false;
        }
        self.items.push(product);
        self.bump();
        true
    }

    /// Remove the line for `id`. Does nothing if it is not in the cart.
    ///
    /// Returns whether the cart changed.
    pub fn remove_from_cart(&mut self, id: ProductId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id != id);
        let changed = self.items.len() != before;
        if changed {
            self.bump();
        }
        changed
    }

    /// Remove every line.
    pub fn clear_cart(&mut self) {
        if !self.items.is_empty() {
            self.items.clear();
            self.bump();
        }
    }

    const fn bump(&mut self) {
        self.revision = self.revision.wrapping_add(1);
    }
}
