//! HTTP route handlers for storefront.
//!
//! Pages are rendered on the server. Mutations are form posts answered with
//! a redirect back to a page (post/redirect/get); the checkout draft is the
//! one endpoint called in the background by htmx.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Product listing (fetches the catalog)
//! GET  /?q=term                - Search the fetched listing
//! GET  /products               - Same as /
//! POST /products/more          - Reveal the next page of products
//! POST /products/retry         - Fetch the catalog again after a failure
//!
//! # Cart
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add a listed product (id, return_to)
//! POST /cart/remove            - Remove a product (id, return_to)
//! POST /cart/clear             - Empty the cart
//! POST /cart/quantity          - Set a line quantity (id, quantity)
//!
//! # Checkout
//! GET  /checkout               - Checkout form, prefilled from the draft
//! POST /checkout/draft         - Save changed fields (HTMX, 204)
//! POST /checkout               - Place the order
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/more", post(products::more))
        .route("/retry", post(products::retry))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/quantity", post(cart::quantity))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::submit))
        .route("/draft", post(checkout::draft))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Listing
        .route("/", get(products::index))
        .nest("/products", product_routes())
        // Cart
        .nest("/cart", cart_routes())
        // Checkout
        .nest("/checkout", checkout_routes())
}
