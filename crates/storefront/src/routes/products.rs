//! Product listing route handlers.
//!
//! The catalog is fetched when the listing is entered. Searching, revealing
//! more products, and retrying work on the copy kept in the session.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::Redirect,
};
use eshop_core::Product;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::CartStore;
use crate::error::Result;
use crate::listing::ProductListPage;
use crate::models::session::{load_cart, load_listing, save_listing};
use crate::state::AppState;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: i32,
    pub title: String,
    pub price: String,
    pub image: String,
    pub in_cart: bool,
}

impl ProductCardView {
    fn new(product: &Product, cart: &CartStore) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            price: product.price.to_string(),
            image: product.image.clone(),
            in_cart: cart.contains(product.id),
        }
    }
}

/// Listing query parameters.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    /// Search term. Present means "stay on the fetched listing".
    pub q: Option<String>,
}

/// Product listing page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsIndexTemplate {
    pub cart_count: usize,
    pub loading: bool,
    pub error: Option<String>,
    pub search_term: String,
    pub products: Vec<ProductCardView>,
    pub no_results: bool,
    pub show_load_more: bool,
    pub return_to: String,
}

/// URL of the listing with a search term, which never refetches.
#[must_use]
pub fn listing_path(term: &str) -> String {
    format!("/?q={}", urlencoding::encode(term))
}

// =============================================================================
// Helpers
// =============================================================================

/// Fresh page with the catalog loaded into it.
async fn fetch_page(state: &AppState) -> ProductListPage {
    let mut page = ProductListPage::mount();
    page.finish_load(state.catalog().load().await);
    page
}

/// The page stored in the session, or a freshly fetched one.
async fn current_page(state: &AppState, session: &Session) -> Result<ProductListPage> {
    match load_listing(session).await? {
        Some(page) => Ok(page),
        None => Ok(fetch_page(state).await),
    }
}

fn render(state: &AppState, page: &ProductListPage, cart: &CartStore) -> ProductsIndexTemplate {
    ProductsIndexTemplate {
        cart_count: cart.len(),
        loading: page.is_loading(),
        error: page.error().map(String::from),
        search_term: page.search_term().to_string(),
        products: page
            .visible_products()
            .into_iter()
            .map(|product| ProductCardView::new(product, cart))
            .collect(),
        no_results: page.has_no_results(),
        show_load_more: page.show_load_more(state.config().load_more_basis),
        return_to: listing_path(page.search_term()),
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Display the product listing.
///
/// Without `q` the catalog is fetched again; with `q` the stored listing is
/// searched.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ListingQuery>,
) -> Result<ProductsIndexTemplate> {
    let page = match query.q {
        None => fetch_page(&state).await,
        Some(term) => {
            let mut page = current_page(&state, &session).await?;
            page.set_search(term);
            page
        }
    };
    save_listing(&session, &page).await?;

    let cart = load_cart(&session).await?;
    Ok(render(&state, &page, &cart))
}

/// Reveal the next page of products.
#[instrument(skip(state, session))]
pub async fn more(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut page = current_page(&state, &session).await?;
    page.load_more();
    save_listing(&session, &page).await?;

    Ok(Redirect::to(&listing_path(page.search_term())))
}

/// Fetch the catalog again after a failure.
#[instrument(skip(state, session))]
pub async fn retry(State(state): State<AppState>, session: Session) -> Result<Redirect> {
    let mut page = current_page(&state, &session).await?;
    if page.retry() {
        page.finish_load(state.catalog().load().await);
    }
    save_listing(&session, &page).await?;

    Ok(Redirect::to(&listing_path(page.search_term())))
}
