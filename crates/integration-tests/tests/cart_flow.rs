//! End-to-end cart behavior: the full add/increment/decrement flow, the
//! persisted wire format, and the provider scope.

#![allow(clippy::unwrap_used)]

use marketplace_cart::{CartProvider, use_cart};
use marketplace_core::{NewCartItem, ProductId};
use marketplace_integration_tests::TestContext;

fn shirt() -> NewCartItem {
    NewCartItem {
        id: ProductId::new("p1"),
        title: "Shirt".to_string(),
        image_url: "u".to_string(),
        price: 10.0,
    }
}

#[tokio::test]
async fn test_full_shopping_flow() {
    let ctx = TestContext::new();
    let cart = &ctx.cart;

    // Start empty
    cart.load().await.unwrap();
    assert!(cart.products().is_empty());

    // Add one product
    cart.add_to_cart(shirt());
    let products = cart.products();
    assert_eq!(products.len(), 1);
    let item = products.first().unwrap();
    assert_eq!(item.id, ProductId::new("p1"));
    assert_eq!(item.quantity, 1);
    assert!((item.price - 10.0).abs() < f64::EPSILON);

    // Increment: quantity becomes 2
    cart.increment(&ProductId::new("p1"));
    assert_eq!(cart.products().first().unwrap().quantity, 2);

    // Decrement twice: floors at 1, never 0 or negative
    cart.decrement(&ProductId::new("p1"));
    cart.decrement(&ProductId::new("p1"));
    assert_eq!(cart.products().first().unwrap().quantity, 1);
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let ctx = TestContext::new();

    ctx.cart.add_to_cart(shirt());
    ctx.cart.increment(&ProductId::new("p1"));
    ctx.cart.flush().await.unwrap();

    let reopened = ctx.reopen();
    reopened.load().await.unwrap();
    assert_eq!(reopened.products(), ctx.cart.products());
}

#[tokio::test]
async fn test_persisted_wire_format() {
    let ctx = TestContext::new();

    ctx.cart.add_to_cart(shirt());
    ctx.cart.flush().await.unwrap();

    let raw = ctx.raw_blob().await.unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();

    let entries = value.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    let entry = entries.first().unwrap();
    assert_eq!(entry["id"], "p1");
    assert_eq!(entry["title"], "Shirt");
    assert_eq!(entry["image_url"], "u");
    assert!(entry["price"].is_number());
    assert_eq!(entry["quantity"], 1);
}

#[tokio::test]
async fn test_loads_blob_written_by_previous_versions() {
    let ctx = TestContext::new();
    ctx.seed_blob(
        r#"[{"id":"p9","title":"Cap","image_url":"https://cdn.example.com/cap.png","price":5.5,"quantity":4}]"#,
    )
    .await;

    ctx.cart.load().await.unwrap();
    let products = ctx.cart.products();
    assert_eq!(products.len(), 1);
    let item = products.first().unwrap();
    assert_eq!(item.id, ProductId::new("p9"));
    assert_eq!(item.quantity, 4);
}

#[tokio::test]
async fn test_malformed_blob_means_empty_cart() {
    let ctx = TestContext::new();
    ctx.seed_blob("{ definitely not a cart").await;

    ctx.cart.load().await.unwrap();
    assert!(ctx.cart.products().is_empty());
}

#[tokio::test]
async fn test_crash_between_update_and_write_loses_the_update() {
    // Known limitation: no transactionality between the in-memory update
    // and the mirror write. A restart before the write lands rolls the
    // cart back to the last persisted state.
    let ctx = TestContext::new();

    ctx.cart.add_to_cart(shirt());
    ctx.cart.flush().await.unwrap();

    let restarted = ctx.reopen();
    restarted.load().await.unwrap();

    ctx.cart.increment(&ProductId::new("p1"));
    assert_eq!(ctx.cart.products().first().unwrap().quantity, 2);
    assert_eq!(restarted.products().first().unwrap().quantity, 1);
}

#[tokio::test]
async fn test_ui_reaches_cart_only_through_provider_scope() {
    let ctx = TestContext::new();

    CartProvider::scope(ctx.cart.clone(), async {
        let cart = use_cart().unwrap();
        cart.add_to_cart(shirt());

        // A nested "component" sees the same store
        let seen = async { use_cart().unwrap().products().len() }.await;
        assert_eq!(seen, 1);
    })
    .await;

    // Outside the scope the interface fails loudly
    assert!(use_cart().is_err());
}
