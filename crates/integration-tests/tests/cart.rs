//! Integration tests for the cart.

use eshop_integration_tests::{TestContext, card_titles, input_value, product, sample_products};
use reqwest::StatusCode;

async fn add(ctx: &TestContext, id: &str) -> String {
    let (status, body) = ctx.post_text("/cart/add", &[("id", id), ("return_to", "/?q=")]).await;
    assert_eq!(status, StatusCode::OK);
    body
}

// ============================================================================
// Listing Buttons
// ============================================================================

#[tokio::test]
async fn test_add_flips_card_button() {
    let ctx = TestContext::new(sample_products(1)).await;
    let (_, body) = ctx.get("/").await;
    assert!(body.contains(r#"aria-label="Add to Cart""#));
    assert!(body.contains(r#"<span class="cart-count">0</span>"#));

    let body = add(&ctx, "1").await;
    assert!(body.contains(r#"aria-label="Remove from Cart""#));
    assert!(!body.contains(r#"aria-label="Add to Cart""#));
    assert!(body.contains(r#"<span class="cart-count">1</span>"#));

    let (_, body) = ctx
        .post_text("/cart/remove", &[("id", "1"), ("return_to", "/?q=")])
        .await;
    assert!(body.contains(r#"aria-label="Add to Cart""#));
    assert!(body.contains(r#"<span class="cart-count">0</span>"#));
}

#[tokio::test]
async fn test_add_twice_keeps_one_line() {
    let ctx = TestContext::new(sample_products(2)).await;
    ctx.get("/").await;
    add(&ctx, "2").await;
    let body = add(&ctx, "2").await;
    assert!(body.contains(r#"<span class="cart-count">1</span>"#));
}

#[tokio::test]
async fn test_add_returns_to_search() {
    let ctx = TestContext::new(sample_products(10)).await;
    ctx.get("/").await;
    let calls = ctx.catalog.calls();

    let (_, body) = ctx
        .post_text("/cart/add", &[("id", "10"), ("return_to", "/?q=Product%2010")])
        .await;
    assert_eq!(card_titles(&body), vec!["Product 10"]);
    assert_eq!(ctx.catalog.calls(), calls);
}

#[tokio::test]
async fn test_add_ignores_foreign_return_path() {
    let ctx = TestContext::new(sample_products(1)).await;
    ctx.get("/").await;

    let resp = ctx
        .client
        .post(ctx.url("/cart/add"))
        .form(&[("id", "1"), ("return_to", "https://elsewhere.test/")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.url().host_str(), Some("127.0.0.1"));
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_add_unknown_product() {
    let ctx = TestContext::new(sample_products(1)).await;
    ctx.get("/").await;
    let (status, _) = ctx.post_text("/cart/add", &[("id", "99")]).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// ============================================================================
// Cart Page
// ============================================================================

#[tokio::test]
async fn test_empty_cart_page() {
    let ctx = TestContext::new(Vec::new()).await;
    let (status, body) = ctx.get("/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Your cart is currently empty."));
    assert!(!body.contains("Proceed to Checkout"));
}

#[tokio::test]
async fn test_quantity_changes_total() {
    let ctx = TestContext::new(vec![product(1, "Test", "Thing", 19.99)]).await;
    ctx.get("/").await;
    add(&ctx, "1").await;

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains("Total: $19.99"));
    assert_eq!(input_value(&body, "quantity").as_deref(), Some("1"));

    let (_, body) = ctx
        .post_text("/cart/quantity", &[("id", "1"), ("quantity", "2")])
        .await;
    assert!(body.contains("Total: $39.98"));
    assert_eq!(input_value(&body, "quantity").as_deref(), Some("2"));
}

#[tokio::test]
async fn test_invalid_quantity_is_ignored() {
    let ctx = TestContext::new(vec![product(1, "Test", "Thing", 19.99)]).await;
    ctx.get("/").await;
    add(&ctx, "1").await;
    ctx.post("/cart/quantity", &[("id", "1"), ("quantity", "3")]).await;

    for bad in ["0", "-1", "abc", ""] {
        let (status, body) = ctx
            .post_text("/cart/quantity", &[("id", "1"), ("quantity", bad)])
            .await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Total: $59.97"), "after {bad:?}");
    }
}

#[tokio::test]
async fn test_cart_change_resets_quantities() {
    let ctx = TestContext::new(vec![
        product(1, "First", "", 10.0),
        product(2, "Second", "", 5.0),
    ])
    .await;
    ctx.get("/").await;
    add(&ctx, "1").await;
    add(&ctx, "2").await;
    ctx.post("/cart/quantity", &[("id", "1"), ("quantity", "4")]).await;

    let (_, body) = ctx
        .post_text("/cart/remove", &[("id", "2"), ("return_to", "/cart")])
        .await;
    assert!(body.contains("Total: $10.00"));
    assert!(!body.contains("Second"));
}

#[tokio::test]
async fn test_clear_cart() {
    let ctx = TestContext::new(sample_products(3)).await;
    ctx.get("/").await;
    add(&ctx, "1").await;
    add(&ctx, "3").await;

    let (_, body) = ctx.get("/cart").await;
    assert!(body.contains("Product 1"));
    assert!(body.contains("Product 3"));
    assert!(body.contains("Clear Cart"));
    assert!(body.contains("Proceed to Checkout"));

    let (_, body) = ctx.post_text("/cart/clear", &[]).await;
    assert!(body.contains("Your cart is currently empty."));
    assert!(body.contains(r#"<span class="cart-count">0</span>"#));
}

#[tokio::test]
async fn test_carts_are_per_visitor() {
    let ctx = TestContext::new(sample_products(1)).await;
    ctx.get("/").await;
    add(&ctx, "1").await;

    let other = reqwest::Client::new();
    let body = other
        .get(ctx.url("/cart"))
        .send()
        .await
        .expect("Failed to send request")
        .text()
        .await
        .expect("Failed to read response");
    assert!(body.contains("Your cart is currently empty."));
}
