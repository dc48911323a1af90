//! Catalog product records.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as published by the catalog API.
///
/// Extra catalog fields (category, rating, ...) are ignored on
/// deserialization. Products are never mutated after they are fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Catalog identifier, unique and stable per catalog.
    pub id: ProductId,
    /// Display title.
    pub title: String,
    /// Long-form description. Some catalog records omit it.
    #[serde(default)]
    pub description: String,
    /// Unit price.
    pub price: Price,
    /// Image URL.
    pub image: String,
}

impl Product {
    /// Whether the title or description contains `needle`.
    ///
    /// `needle` must already be lowercase.
    #[must_use]
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// A cart line. Currently the same shape as a [`Product`]; quantity is a
/// view concern and is not part of the cart itself.
pub type CartItem = Product;
