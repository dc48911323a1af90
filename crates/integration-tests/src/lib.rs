//! Integration tests for E-Shop.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p eshop-integration-tests
//! ```
//!
//! Each test starts its own storefront and a mock product catalog on
//! ephemeral ports, then drives the storefront with a cookie-keeping
//! `reqwest` client, the way a browser would.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::get};
use eshop_storefront::config::StorefrontConfig;
use eshop_storefront::state::AppState;
use reqwest::Client;
use serde_json::{Value, json};
use url::Url;

/// Build `count` catalog records with ids `1..=count`.
///
/// Titles are `Product <id>`, prices 10.00, and each description mentions
/// the id so searches can target descriptions.
#[must_use]
pub fn sample_products(count: u32) -> Vec<Value> {
    (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Product {id}"),
                "description": format!("Description of item number {id}"),
                "price": 10.0,
                "image": format!("https://images.test/{id}.jpg"),
                "category": "misc",
            })
        })
        .collect()
}

/// Build one catalog record.
#[must_use]
pub fn product(id: u32, title: &str, description: &str, price: f64) -> Value {
    json!({
        "id": id,
        "title": title,
        "description": description,
        "price": price,
        "image": format!("https://images.test/{id}.jpg"),
    })
}

async fn bind() -> (tokio::net::TcpListener, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local address");
    (listener, addr)
}

// ============================================================================
// Mock Catalog
// ============================================================================

struct CatalogState {
    products: Vec<Value>,
    failing: AtomicBool,
    calls: AtomicUsize,
}

async fn serve_products(State(state): State<Arc<CatalogState>>) -> axum::response::Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    if state.failing.load(Ordering::SeqCst) {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    }
    Json(state.products.clone()).into_response()
}

/// A product catalog served on an ephemeral port.
pub struct MockCatalog {
    addr: SocketAddr,
    state: Arc<CatalogState>,
}

impl MockCatalog {
    /// Start serving `products` at `/products`.
    pub async fn start(products: Vec<Value>) -> Self {
        let state = Arc::new(CatalogState {
            products,
            failing: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        });
        let app = Router::new()
            .route("/products", get(serve_products))
            .with_state(Arc::clone(&state));

        let (listener, addr) = bind().await;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { addr, state }
    }

    /// Catalog endpoint URL.
    #[must_use]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/products", self.addr)).expect("Invalid mock catalog URL")
    }

    /// Answer every following request with a 500 (or stop doing so).
    pub fn set_failing(&self, failing: bool) {
        self.state.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state.calls.load(Ordering::SeqCst)
    }
}

// ============================================================================
// Test Context
// ============================================================================

/// A running storefront, its catalog, and a browser-like client.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
    pub catalog: MockCatalog,
}

impl TestContext {
    /// Start a storefront with default settings over `products`.
    pub async fn new(products: Vec<Value>) -> Self {
        Self::with_config(products, |_| {}).await
    }

    /// Start a storefront, adjusting its configuration first.
    pub async fn with_config(
        products: Vec<Value>,
        configure: impl FnOnce(&mut StorefrontConfig),
    ) -> Self {
        let catalog = MockCatalog::start(products).await;

        let mut config = StorefrontConfig::local(catalog.url());
        configure(&mut config);
        let state = AppState::new(config).expect("Failed to build storefront state");
        let app = eshop_storefront::app(state);

        let (listener, addr) = bind().await;
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
            catalog,
        }
    }

    /// Absolute URL for a storefront path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET a page, returning status and body.
    pub async fn get(&self, path: &str) -> (reqwest::StatusCode, String) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to send request");
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read response"))
    }

    /// POST a form, following the redirect like a browser.
    pub async fn post(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .form(form)
            .send()
            .await
            .expect("Failed to send request")
    }

    /// POST a form and return status and body of the final page.
    pub async fn post_text(&self, path: &str, form: &[(&str, &str)]) -> (reqwest::StatusCode, String) {
        let resp = self.post(path, form).await;
        let status = resp.status();
        (status, resp.text().await.expect("Failed to read response"))
    }
}

// ============================================================================
// HTML Helpers
// ============================================================================

/// Titles of the product cards on a listing page, in order.
#[must_use]
pub fn card_titles(html: &str) -> Vec<String> {
    html.split(r#"<h2 class="product-card-title">"#)
        .skip(1)
        .filter_map(|rest| rest.split("</h2>").next())
        .map(str::to_string)
        .collect()
}

/// Value attribute of the input named `name`.
#[must_use]
pub fn input_value(html: &str, name: &str) -> Option<String> {
    let start = html.find(&format!(r#"name="{name}""#))?;
    let rest = html.get(start..)?;
    let value = rest.split(r#"value=""#).nth(1)?;
    value.split('"').next().map(str::to_string)
}
