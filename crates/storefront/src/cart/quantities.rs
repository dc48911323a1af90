//! Per-line quantities shown on the cart page.
//!
//! Quantities are deliberately separate from [`CartStore`]: the cart knows
//! *what* was picked, this map only feeds the displayed total. Invariant:
//! whenever the cart revision changes, every quantity goes back to 1.

use std::collections::BTreeMap;

use eshop_core::{Price, ProductId};
use serde::{Deserialize, Serialize};

use super::CartStore;

/// Largest quantity accepted for a single line.
pub const MAX_QUANTITY: u32 = 999;

/// Quantity per cart line, valid for one cart revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartQuantities {
    revision: Option<u64>,
    quantities: BTreeMap<ProductId, u32>,
}

impl CartQuantities {
    /// Quantities for the current cart, all set to 1.
    #[must_use]
    pub fn for_cart(cart: &CartStore) -> Self {
        let mut quantities = Self::default();
        quantities.sync(cart);
        quantities
    }

    /// Rebuild the map if it was made for a different cart revision.
    ///
    /// Returns whether the quantities were reset.
    pub fn sync(&mut self, cart: &CartStore) -> bool {
        if self.revision == Some(cart.revision()) {
            return false;
        }
        self.revision = Some(cart.revision());
        self.quantities = cart.items().iter().map(|item| (item.id, 1)).collect();
        true
    }

    /// Quantity for a line, 1 if unknown.
    #[must_use]
    pub fn get(&self, id: ProductId) -> u32 {
        self.quantities.get(&id).copied().unwrap_or(1)
    }

    /// Set a line's quantity from raw form input.
    ///
    /// Non-numeric input, values outside `1..=MAX_QUANTITY`, and ids that
    /// are not in the cart are ignored and the previous value is kept.
    /// Returns whether the quantity was accepted.
    pub fn set_quantity(&mut self, id: ProductId, raw: &str) -> bool {
        let Ok(quantity) = raw.trim().parse::<u32>() else {
            return false;
        };
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return false;
        }
        match self.quantities.get_mut(&id) {
            Some(slot) => {
                *slot = quantity;
                true
            }
            None => false,
        }
    }

    /// Sum of `price × quantity` over the cart.
    #[must_use]
    pub fn total(&self, cart: &CartStore) -> Price {
        cart.items()
            .iter()
            .map(|item| item.price.times(self.get(item.id)))
            .sum()
    }
}
