//! Product listing page controller.
//!
//! The listing is a small state machine:
//!
//! ```text
//! Loading --fetch ok--> Ready --search / load more--> Ready
//!    |
//!    +--fetch failed--> Error --retry--> Loading
//! ```
//!
//! The controller performs no I/O. The route calls
//! [`ProductListPage::mount`] (or [`ProductListPage::retry`]), awaits the
//! catalog, and hands the result to [`ProductListPage::finish_load`]. The
//! whole page is kept in the session so that searching, revealing more
//! products, and adding to the cart work on the fetched list without another
//! catalog request.

mod filter;

pub use filter::filter_products;

use std::str::FromStr;

use eshop_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::FetchError;

/// How many products each "Load More" reveals, and the initial window.
pub const PAGE_SIZE: usize = 6;

/// Load state of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListingStatus {
    Loading,
    Ready,
    Error(String),
}

/// What the "Load More" control compares the visible window against.
///
/// `Unfiltered` is the established behavior: with a search active it can
/// show a control that reveals nothing new. `Filtered` hides it as soon as
/// every match is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadMoreBasis {
    #[default]
    Unfiltered,
    Filtered,
}

/// Error returned when parsing an unknown [`LoadMoreBasis`].
#[derive(Debug, Error)]
#[error("expected `unfiltered` or `filtered`, got `{0}`")]
pub struct InvalidLoadMoreBasis(String);

impl FromStr for LoadMoreBasis {
    type Err = InvalidLoadMoreBasis;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unfiltered" => Ok(Self::Unfiltered),
            "filtered" => Ok(Self::Filtered),
            _ => Err(InvalidLoadMoreBasis(s.to_string())),
        }
    }
}

/// State of the product listing page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductListPage {
    status: ListingStatus,
    products: Vec<Product>,
    search_term: String,
    visible_count: usize,
}

impl Default for ProductListPage {
    fn default() -> Self {
        Self::mount()
    }
}

impl ProductListPage {
    /// Enter the page: loading, nothing fetched, first window, no search.
    #[must_use]
    pub const fn mount() -> Self {
        Self {
            status: ListingStatus::Loading,
            products: Vec::new(),
            search_term: String::new(),
            visible_count: PAGE_SIZE,
        }
    }

    /// Current load state.
    #[must_use]
    pub const fn status(&self) -> &ListingStatus {
        &self.status
    }

    /// Whether a fetch is outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, ListingStatus::Loading)
    }

    /// Error message of the last failed fetch.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ListingStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Apply the outcome of a catalog fetch.
    ///
    /// Success replaces the product list and resets the window; failure
    /// keeps whatever was fetched before and records the message.
    pub fn finish_load(&mut self, result: Result<Vec<Product>, FetchError>) {
        match result {
            Ok(products) => {
                self.products = products;
                self.visible_count = PAGE_SIZE;
                self.status = ListingStatus::Ready;
            }
            Err(err) => {
                self.status = ListingStatus::Error(err.to_string());
            }
        }
    }

    /// Leave the error state to fetch again.
    ///
    /// Returns `true` when the caller should re-invoke the catalog. Outside
    /// the error state this does nothing and returns `false`.
    pub fn retry(&mut self) -> bool {
        if self.error().is_none() {
            return false;
        }
        self.status = ListingStatus::Loading;
        true
    }

    /// Current search term.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    /// Change the search term. The visible window is left as is.
    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    /// Number of leading matches currently revealed.
    #[must_use]
    pub const fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Reveal the next page of products.
    pub const fn load_more(&mut self) {
        self.visible_count = self.visible_count.saturating_add(PAGE_SIZE);
    }

    /// Every fetched product, in catalog order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Look up a fetched product.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Products matching the search term.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Product> {
        filter_products(&self.products, &self.search_term)
    }

    /// Matching products inside the visible window.
    #[must_use]
    pub fn visible_products(&self) -> Vec<&Product> {
        let mut matches = self.filtered();
        matches.truncate(self.visible_count);
        matches
    }

    /// Whether the page should show "No products found".
    #[must_use]
    pub fn has_no_results(&self) -> bool {
        matches!(self.status, ListingStatus::Ready) && self.filtered().is_empty()
    }

    /// Whether the "Load More" control should be offered.
    #[must_use]
    pub fn show_load_more(&self, basis: LoadMoreBasis) -> bool {
        if !matches!(self.status, ListingStatus::Ready) {
            return false;
        }
        let total = match basis {
            LoadMoreBasis::Unfiltered => self.products.len(),
            LoadMoreBasis::Filtered => self.filtered().len(),
        };
        self.visible_count < total
    }
}
