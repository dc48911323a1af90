//! Integration tests for the product listing.

use eshop_integration_tests::{TestContext, card_titles, product, sample_products};
use eshop_storefront::listing::LoadMoreBasis;
use reqwest::StatusCode;

// ============================================================================
// Fetch
// ============================================================================

#[tokio::test]
async fn test_listing_shows_first_six_products() {
    let ctx = TestContext::new(sample_products(10)).await;

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains(r#"role="status""#));
    assert_eq!(
        card_titles(&body),
        (1..=6).map(|i| format!("Product {i}")).collect::<Vec<_>>()
    );
    assert!(body.contains("Load More"));
    assert!(body.contains(r#"placeholder="Search products...""#));
}

#[tokio::test]
async fn test_products_path_is_the_listing() {
    let ctx = TestContext::new(sample_products(3)).await;

    let (status, body) = ctx.get("/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(card_titles(&body).len(), 3);
    assert!(!body.contains("Load More"));
}

#[tokio::test]
async fn test_fetch_failure_then_retry() {
    let ctx = TestContext::new(sample_products(2)).await;
    ctx.catalog.set_failing(true);

    let (status, body) = ctx.get("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Oops! Failed to fetch products"));
    assert!(body.contains("Try Again"));
    assert!(card_titles(&body).is_empty());

    ctx.catalog.set_failing(false);
    let calls = ctx.catalog.calls();
    let (status, body) = ctx.post_text("/products/retry", &[]).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctx.catalog.calls(), calls + 1);
    assert!(!body.contains("Oops!"));
    assert_eq!(card_titles(&body), vec!["Product 1", "Product 2"]);
}

#[tokio::test]
async fn test_retry_without_error_does_not_fetch() {
    let ctx = TestContext::new(sample_products(2)).await;
    ctx.get("/").await;
    let calls = ctx.catalog.calls();

    let (_, body) = ctx.post_text("/products/retry", &[]).await;
    assert_eq!(ctx.catalog.calls(), calls);
    assert_eq!(card_titles(&body).len(), 2);
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test]
async fn test_search_is_case_insensitive_and_local() {
    let ctx = TestContext::new(vec![
        product(1, "Mens Casual Shirt", "Slim fit", 22.3),
        product(2, "Womens Jacket", "Warm and waterproof", 56.99),
        product(3, "Backpack", "Fits a 15 inch laptop", 109.95),
    ])
    .await;
    ctx.get("/").await;
    let calls = ctx.catalog.calls();

    let (_, body) = ctx.get("/?q=SHIRT").await;
    assert_eq!(card_titles(&body), vec!["Mens Casual Shirt"]);

    let (_, body) = ctx.get("/?q=laptop").await;
    assert_eq!(card_titles(&body), vec!["Backpack"]);
    assert!(body.contains(r#"value="laptop""#));

    assert_eq!(ctx.catalog.calls(), calls);
}

#[tokio::test]
async fn test_search_without_matches() {
    let ctx = TestContext::new(sample_products(4)).await;
    ctx.get("/").await;

    let (status, body) = ctx.get("/?q=xyznotfound").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No products found"));
    assert!(card_titles(&body).is_empty());
}

#[tokio::test]
async fn test_search_before_any_fetch_loads_catalog() {
    let ctx = TestContext::new(sample_products(3)).await;

    let (_, body) = ctx.get("/?q=product%202").await;
    assert_eq!(ctx.catalog.calls(), 1);
    assert_eq!(card_titles(&body), vec!["Product 2"]);
}

// ============================================================================
// Load More
// ============================================================================

#[tokio::test]
async fn test_load_more_reveals_six_more() {
    let ctx = TestContext::new(sample_products(14)).await;
    ctx.get("/").await;

    let (_, body) = ctx.post_text("/products/more", &[]).await;
    assert_eq!(card_titles(&body).len(), 12);
    assert!(card_titles(&body).contains(&"Product 7".to_string()));
    assert!(body.contains("Load More"));

    let (_, body) = ctx.post_text("/products/more", &[]).await;
    assert_eq!(card_titles(&body).len(), 14);
    assert!(!body.contains("Load More"));
}

#[tokio::test]
async fn test_load_more_keeps_search() {
    let ctx = TestContext::new(sample_products(20)).await;
    ctx.get("/").await;
    ctx.get("/?q=product").await;

    let (_, body) = ctx.post_text("/products/more", &[]).await;
    assert_eq!(card_titles(&body).len(), 12);
    assert!(body.contains(r#"value="product""#));
}

#[tokio::test]
async fn test_load_more_basis_with_search() {
    // "Product 1" matches products 1 and 10: both visible, eight still hidden.
    let unfiltered = TestContext::new(sample_products(10)).await;
    unfiltered.get("/").await;
    let (_, body) = unfiltered.get("/?q=Product%201").await;
    assert_eq!(card_titles(&body), vec!["Product 1", "Product 10"]);
    assert!(body.contains("Load More"));

    let filtered = TestContext::with_config(sample_products(10), |config| {
        config.load_more_basis = LoadMoreBasis::Filtered;
    })
    .await;
    filtered.get("/").await;
    let (_, body) = filtered.get("/?q=Product%201").await;
    assert_eq!(card_titles(&body).len(), 2);
    assert!(!body.contains("Load More"));
}

#[tokio::test]
async fn test_refetch_resets_window() {
    let ctx = TestContext::new(sample_products(14)).await;
    ctx.get("/").await;
    ctx.post("/products/more", &[]).await;

    let (_, body) = ctx.get("/").await;
    assert_eq!(card_titles(&body).len(), 6);
}

// ============================================================================
// Ambient
// ============================================================================

#[tokio::test]
async fn test_health() {
    let ctx = TestContext::new(Vec::new()).await;
    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
}

#[tokio::test]
async fn test_response_headers() {
    let ctx = TestContext::new(sample_products(1)).await;
    let resp = ctx
        .client
        .get(ctx.url("/"))
        .send()
        .await
        .expect("Failed to send request");

    let headers = resp.headers();
    assert!(headers.contains_key("x-request-id"));
    assert_eq!(headers["x-frame-options"], "DENY");
    assert_eq!(headers["cache-control"], "no-store, max-age=0");
    let csp = headers["content-security-policy"].to_str().unwrap_or_default();
    assert!(csp.contains(&ctx.catalog.url().origin().ascii_serialization()));
}

#[tokio::test]
async fn test_static_assets() {
    let ctx = TestContext::new(Vec::new()).await;
    let (status, body) = ctx.get("/static/css/main.css").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(".product-card"));
}
