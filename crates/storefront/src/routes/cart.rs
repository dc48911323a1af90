//! Cart route handlers.
//!
//! Cart mutations are plain form posts that redirect back to the page they
//! came from. The cart itself and the quantities shown on the cart page are
//! both kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, response::Redirect};
use eshop_core::ProductId;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{CartQuantities, CartStore};
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{
    load_cart, load_listing, load_quantities, save_cart, save_quantities,
};

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartLineView {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub image: String,
    pub quantity: u32,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub total: String,
}

impl CartView {
    fn new(cart: &CartStore, quantities: &CartQuantities) -> Self {
        Self {
            lines: cart
                .items()
                .iter()
                .map(|item| CartLineView {
                    id: item.id.as_i32(),
                    title: item.title.clone(),
                    price: item.price.to_string(),
                    image: item.image.clone(),
                    quantity: quantities.get(item.id),
                })
                .collect(),
            total: quantities.total(cart).rounded(),
        }
    }
}

/// Add or remove form data.
#[derive(Debug, Deserialize)]
pub struct CartItemForm {
    pub id: i32,
    /// Page to return to afterwards.
    #[serde(default)]
    pub return_to: Option<String>,
}

/// Quantity form data. The quantity is validated by [`CartQuantities`].
#[derive(Debug, Deserialize)]
pub struct QuantityForm {
    pub id: i32,
    pub quantity: String,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart_count: usize,
    pub cart: CartView,
}

/// Only same-site absolute paths are followed; anything else goes home.
fn safe_return_path(return_to: Option<&str>) -> &str {
    match return_to {
        Some(path) if path.starts_with('/') && !path.starts_with("//") && !path.contains('\\') => {
            path
        }
        _ => "/",
    }
}

/// Display cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let cart = load_cart(&session).await?;
    let quantities = load_quantities(&session, &cart).await?;
    save_quantities(&session, &quantities).await?;

    Ok(CartShowTemplate {
        cart_count: cart.len(),
        cart: CartView::new(&cart, &quantities),
    })
}

/// Add a product from the current listing to the cart.
#[instrument(skip(session))]
pub async fn add(session: Session, Form(form): Form<CartItemForm>) -> Result<Redirect> {
    let id = ProductId::new(form.id);
    let product = load_listing(&session)
        .await?
        .and_then(|page| page.product(id).cloned())
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    let mut cart = load_cart(&session).await?;
    if cart.add_to_cart(product) {
        save_cart(&session, &cart).await?;
        let product_id = id.to_string();
        add_breadcrumb("cart", "Added to cart", Some(&[("product_id", product_id.as_str())]));
    }

    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
}

/// Remove a product from the cart.
#[instrument(skip(session))]
pub async fn remove(session: Session, Form(form): Form<CartItemForm>) -> Result<Redirect> {
    let id = ProductId::new(form.id);
    let mut cart = load_cart(&session).await?;
    if cart.remove_from_cart(id) {
        save_cart(&session, &cart).await?;
        let product_id = id.to_string();
        add_breadcrumb("cart", "Removed from cart", Some(&[("product_id", product_id.as_str())]));
    }

    Ok(Redirect::to(safe_return_path(form.return_to.as_deref())))
}

/// Empty the cart.
#[instrument(skip(session))]
pub async fn clear(session: Session) -> Result<Redirect> {
    let mut cart = load_cart(&session).await?;
    cart.clear_cart();
    save_cart(&session, &cart).await?;

    Ok(Redirect::to("/cart"))
}

/// Change the quantity of a cart line. Invalid input is ignored.
#[instrument(skip(session))]
pub async fn quantity(session: Session, Form(form): Form<QuantityForm>) -> Result<Redirect> {
    let cart = load_cart(&session).await?;
    let mut quantities = load_quantities(&session, &cart).await?;
    if quantities.set_quantity(ProductId::new(form.id), &form.quantity) {
        save_quantities(&session, &quantities).await?;
    } else {
        tracing::debug!(id = form.id, quantity = %form.quantity, "Ignoring quantity");
    }

    Ok(Redirect::to("/cart"))
}
