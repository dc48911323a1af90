//! Session-stored visitor state.
//!
//! Each handler loads what it needs, mutates it, and saves it back before
//! responding. Values live as long as the session.

use tower_sessions::Session;
use tower_sessions::session::Error;

use crate::cart::{CartQuantities, CartStore};
use crate::listing::ProductListPage;

/// Session keys for visitor state.
pub mod keys {
    /// Key for the cart.
    pub const CART: &str = "cart";

    /// Key for the quantities shown on the cart page.
    pub const CART_QUANTITIES: &str = "cart_quantities";

    /// Key for the product listing page.
    pub const LISTING: &str = "listing";

    /// Key for the checkout draft text.
    pub const CHECKOUT_DRAFT: &str = "checkoutForm";
}

/// Load the visitor's cart, empty if none was stored.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_cart(session: &Session) -> Result<CartStore, Error> {
    Ok(session.get(keys::CART).await?.unwrap_or_default())
}

/// Store the visitor's cart.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_cart(session: &Session, cart: &CartStore) -> Result<(), Error> {
    session.insert(keys::CART, cart).await
}

/// Load the cart-page quantities, reset to 1 if the cart has changed since
/// they were stored.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_quantities(session: &Session, cart: &CartStore) -> Result<CartQuantities, Error> {
    let mut quantities: CartQuantities = session
        .get(keys::CART_QUANTITIES)
        .await?
        .unwrap_or_default();
    quantities.sync(cart);
    Ok(quantities)
}

/// Store the cart-page quantities.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_quantities(session: &Session, quantities: &CartQuantities) -> Result<(), Error> {
    session.insert(keys::CART_QUANTITIES, quantities).await
}

/// Load the listing page from the last visit, if any.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn load_listing(session: &Session) -> Result<Option<ProductListPage>, Error> {
    session.get(keys::LISTING).await
}

/// Store the listing page.
///
/// # Errors
///
/// Returns an error if the session store fails.
pub async fn save_listing(session: &Session, page: &ProductListPage) -> Result<(), Error> {
    session.insert(keys::LISTING, page).await
}
