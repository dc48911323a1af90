//! Client-side search over the fetched product list.

use eshop_core::Product;

/// Products whose title or description contains `term`, ignoring case.
///
/// An empty term matches everything. Catalog order is preserved.
#[must_use]
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|product| product.matches_lowercase(&needle))
        .collect()
}
