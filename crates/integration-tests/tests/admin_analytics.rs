//! Admin analytics over data written by the storefront.

use axum::http::{Method, StatusCode};
use honey_palace_integration_tests::TestContext;
use honey_palace_store::Collection;
use serde_json::json;

#[tokio::test]
async fn summary_reflects_storefront_orders() {
    let mut ctx = TestContext::new();

    for amount in [10, 25] {
        let created = ctx
            .storefront(
                Method::POST,
                "/orders/verify",
                Some(&json!({"item": "honey", "amount": amount})),
            )
            .await;
        assert_eq!(created.status, StatusCode::CREATED);
    }
    ctx.seed(Collection::Orders, json!({"status": "Shipped", "total": 5}))
        .await;

    let summary = ctx.admin(Method::GET, "/admin/analytics").await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(
        summary.body["data"],
        json!({"totalOrders": 3, "totalRevenue": 40.0, "shippedOrders": 1, "pendingOrders": 2})
    );
}

#[tokio::test]
async fn huge_amounts_are_refused_and_summary_still_answers() {
    let mut ctx = TestContext::new();
    let huge = "60000000000000000000000000000";

    let refused = ctx
        .storefront(Method::POST, "/orders/verify", Some(&json!({"amount": huge})))
        .await;
    assert_eq!(refused.status, StatusCode::BAD_REQUEST);

    // Older rows written before the bound existed
    ctx.seed(Collection::Orders, json!({"status": "Paid", "amount": huge}))
        .await;
    ctx.seed(Collection::Orders, json!({"status": "Paid", "total": huge}))
        .await;

    let summary = ctx.admin(Method::GET, "/admin/analytics").await;
    assert_eq!(summary.status, StatusCode::OK);
    assert_eq!(summary.body["data"]["totalOrders"], 2);
    assert!(summary.body["data"]["totalRevenue"].as_f64().is_some());
}

#[tokio::test]
async fn reset_all_empties_seeded_aggregates() {
    let ctx = TestContext::new();
    for collection in [
        Collection::CustomerAnalytics,
        Collection::OrderAnalytics,
        Collection::ProductAnalytics,
    ] {
        ctx.seed(collection, json!({"visits": 3})).await;
        ctx.seed(collection, json!({"visits": 7})).await;
    }
    ctx.seed(Collection::Orders, json!({"item": "honey", "amount": 10}))
        .await;

    let reset = ctx.admin(Method::POST, "/admin/analytics/reset-all").await;
    assert_eq!(reset.status, StatusCode::OK);
    assert_eq!(reset.body["success"], true);

    assert_eq!(ctx.count(Collection::CustomerAnalytics).await, 0);
    assert_eq!(ctx.count(Collection::OrderAnalytics).await, 0);
    assert_eq!(ctx.count(Collection::ProductAnalytics).await, 0);
    // Orders themselves are not analytics aggregates
    assert_eq!(ctx.count(Collection::Orders).await, 1);
}

#[tokio::test]
async fn single_reset_reports_count() {
    let ctx = TestContext::new();
    ctx.seed(Collection::ProductAnalytics, json!({"views": 1}))
        .await;

    let reset = ctx
        .admin(Method::POST, "/admin/analytics/reset-products")
        .await;
    assert_eq!(reset.status, StatusCode::OK);
    assert_eq!(reset.body["data"], json!({"kind": "products", "deleted": 1}));

    let again = ctx
        .admin(Method::POST, "/admin/analytics/reset-products")
        .await;
    assert_eq!(again.body["data"]["deleted"], 0);
}

#[tokio::test]
async fn both_apps_report_ready_until_store_goes_offline() {
    let mut ctx = TestContext::new();
    assert_eq!(ctx.admin(Method::GET, "/health/ready").await.status, StatusCode::OK);

    ctx.store.set_offline(true);
    assert_eq!(
        ctx.admin(Method::GET, "/health/ready").await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        ctx.storefront(Method::GET, "/health/ready", None).await.status,
        StatusCode::SERVICE_UNAVAILABLE
    );
}
