//! Checkout intake route handlers.
//!
//! This records the shopper's intent to buy. Payment confirmation and later
//! status changes (Paid, Shipped, ...) happen outside the storefront.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use honey_palace_core::{NewOrder, OrderId, OrderStatus};
use honey_palace_store::{Collection, Document, SortOrder};

use super::{ApiJson, CreatedResponse, DataResponse, created, ok};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Record a new order as "Pending Payment".
///
/// POST /orders/verify
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewOrder>,
) -> Result<(StatusCode, Json<CreatedResponse<OrderId>>)> {
    let order = payload.validate()?;
    tracing::debug!(items = order.items.len(), "Order validated");
    let document = order.into_document(OrderStatus::PendingPayment);

    let id = state
        .store()
        .insert(Collection::Orders, document, Utc::now())
        .await?;

    let order_id = id.to_string();
    tracing::info!(order_id = %order_id, "Order recorded");
    add_breadcrumb("checkout", "Order recorded", Some(&[("order_id", order_id.as_str())]));

    Ok(created(id.cast()))
}

/// List every order, oldest first. No filtering or paging.
///
/// GET /orders/verify
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<Document>>>> {
    let orders = state
        .store()
        .find_all(Collection::Orders, SortOrder::OldestFirst)
        .await?;
    Ok(ok(orders))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;
    use honey_palace_core::DocumentId;
    use honey_palace_store::DocumentStore;
    use serde_json::json;
    use tower::ServiceExt;

    use super::*;
    use crate::routes::test_support::{get, json_body, post_json, test_app};

    async fn place(app: &axum::Router, body: serde_json::Value) -> serde_json::Value {
        let response = app
            .clone()
            .oneshot(post_json("/orders/verify", &body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await
    }

    #[tokio::test]
    async fn test_order_is_stamped_pending_payment() {
        let (app, store) = test_app();

        let body = place(&app, json!({"item": "honey", "amount": 10})).await;
        assert_eq!(body["success"], true);

        let id = DocumentId::parse(body["id"].as_str().unwrap()).unwrap();
        let stored = store
            .find_by_id(Collection::Orders, id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(stored.get("status"), Some(&json!("Pending Payment")));
        assert_eq!(stored.get("item"), Some(&json!("honey")));
        assert_eq!(stored.get("amount").and_then(serde_json::Value::as_f64), Some(10.0));
        assert!(stored.created_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_each_order_gets_a_fresh_id() {
        let (app, _store) = test_app();

        let first = place(&app, json!({"item": "honey", "amount": 10})).await;
        let second = place(&app, json!({"item": "honey", "amount": 10})).await;
        assert_ne!(first["id"], second["id"]);
    }

    #[tokio::test]
    async fn test_client_cannot_set_status() {
        let (app, store) = test_app();

        let response = app
            .oneshot(post_json(
                "/orders/verify",
                &json!({"item": "honey", "status": "Paid"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(json_body(response).await["success"], false);
        assert_eq!(store.count(Collection::Orders).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_index_lists_orders() {
        let (app, _store) = test_app();
        place(&app, json!({"amount": 5})).await;
        place(&app, json!({"amount": 7})).await;

        let body = json_body(app.oneshot(get("/orders/verify")).await.unwrap()).await;
        let orders = body["data"].as_array().unwrap();
        assert_eq!(orders.len(), 2);
        assert!(orders.iter().all(|o| o["status"] == "Pending Payment"));
    }
}
