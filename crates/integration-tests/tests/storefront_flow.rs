//! Shopper-facing flows across the storefront and the shared store.

use axum::http::{Method, StatusCode};
use honey_palace_integration_tests::TestContext;
use honey_palace_store::Collection;
use serde_json::json;

#[tokio::test]
async fn product_lookup_distinguishes_malformed_and_missing_ids() {
    let mut ctx = TestContext::new();
    let id = ctx
        .seed(Collection::Products, json!({"name": "Wildflower Honey", "price": 12.5}))
        .await;

    let found = ctx
        .storefront(Method::GET, &format!("/products/{id}"), None)
        .await;
    assert_eq!(found.status, StatusCode::OK);
    assert_eq!(found.body["data"]["_id"], id.as_str());
    assert_eq!(found.body["data"]["name"], "Wildflower Honey");

    let malformed = ctx.storefront(Method::GET, "/products/abc", None).await;
    assert_eq!(malformed.status, StatusCode::BAD_REQUEST);
    assert_eq!(malformed.body["success"], false);

    let missing = ctx
        .storefront(
            Method::GET,
            "/products/00000000-0000-4000-8000-000000000000",
            None,
        )
        .await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["success"], false);
}

#[tokio::test]
async fn cart_merges_catalog_products_across_requests() {
    let mut ctx = TestContext::new();
    let id = ctx
        .seed(Collection::Products, json!({"name": "Raw Honeycomb", "price": 20, "images": ["comb.jpg"]}))
        .await;

    let product = ctx
        .storefront(Method::GET, &format!("/products/{id}"), None)
        .await
        .body["data"]
        .clone();

    for quantity in [1, 2] {
        let added = ctx
            .storefront(
                Method::POST,
                "/cart/add",
                Some(&json!({"product": product, "quantity": quantity})),
            )
            .await;
        assert_eq!(added.status, StatusCode::OK);
    }

    let cart = ctx.storefront(Method::GET, "/cart", None).await;
    let items = cart.body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id.as_str());
    assert_eq!(items[0]["quantity"], 3);
    assert_eq!(cart.body["data"]["subtotal"], 60.0);
}

#[tokio::test]
async fn order_intake_stamps_pending_payment() {
    let mut ctx = TestContext::new();

    let first = ctx
        .storefront(
            Method::POST,
            "/orders/verify",
            Some(&json!({"item": "honey", "amount": 10})),
        )
        .await;
    let second = ctx
        .storefront(
            Method::POST,
            "/orders/verify",
            Some(&json!({"item": "honey", "amount": 10})),
        )
        .await;
    assert_eq!(first.status, StatusCode::CREATED);
    assert_ne!(first.body["id"], second.body["id"]);

    let orders = ctx.storefront(Method::GET, "/orders/verify", None).await;
    let orders = orders.body["data"].as_array().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0]["status"], "Pending Payment");
    assert_eq!(orders[0]["item"], "honey");
    assert!(orders[0]["createdAt"].is_string());
    assert_eq!(ctx.count(Collection::Orders).await, 2);
}

#[tokio::test]
async fn settings_saves_accumulate() {
    let mut ctx = TestContext::new();

    ctx.storefront(Method::POST, "/settings", Some(&json!({"theme": "dark"})))
        .await;
    ctx.storefront(Method::POST, "/settings", Some(&json!({"banner": "sale"})))
        .await;

    let settings = ctx.storefront(Method::GET, "/settings", None).await;
    assert_eq!(settings.status, StatusCode::OK);
    assert_eq!(settings.body["data"]["theme"], "dark");
    assert_eq!(settings.body["data"]["banner"], "sale");
}

#[tokio::test]
async fn contact_messages_list_newest_first() {
    let mut ctx = TestContext::new();

    for name in ["Ada", "Grace"] {
        let created = ctx
            .storefront(
                Method::POST,
                "/contacts",
                Some(&json!({"name": name, "email": "bee@example.com", "message": "More comb please"})),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
        assert_eq!(created.body["success"], true);
    }

    let listed = ctx.storefront(Method::GET, "/contacts", None).await;
    let messages = listed.body["data"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["name"], "Grace");
}
