//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! # Products
//! GET  /products               - Catalog listing
//! GET  /products/{id}          - Single product
//!
//! # Contact form
//! POST /contacts               - Submit a contact message
//! GET  /contacts               - All messages, newest first
//!
//! # Checkout intake
//! POST /orders/verify          - Record an order as "Pending Payment"
//! GET  /orders/verify          - All orders
//!
//! # Site settings
//! GET  /settings               - The settings document (or null)
//! POST /settings               - Merge fields into the settings document
//!
//! # Cart (session slot "cart")
//! GET  /cart                   - Cart contents
//! POST /cart/add               - Add a product
//! POST /cart/update            - Set a line's quantity
//! POST /cart/remove            - Remove a line
//! POST /cart/clear             - Empty the cart
//! GET  /cart/count             - Total units
//! ```
//!
//! Every response is a JSON object with a `success` flag.

pub mod cart;
pub mod contacts;
pub mod orders;
pub mod products;
pub mod settings;

use axum::{
    Json, Router,
    extract::FromRequest,
    http::StatusCode,
    routing::{get, post},
};
use serde::Serialize;

use crate::error::AppError;
use crate::state::AppState;

/// JSON body extractor whose rejections render as `AppError`.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Successful response carrying a payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

/// Successful insert, carrying the assigned key.
#[derive(Debug, Serialize)]
pub struct CreatedResponse<I> {
    pub success: bool,
    pub id: I,
}

/// Wrap `data` in a success envelope.
pub const fn ok<T>(data: T) -> Json<DataResponse<T>> {
    Json(DataResponse {
        success: true,
        data,
    })
}

/// `201 Created` with the new key.
pub const fn created<I>(id: I) -> (StatusCode, Json<CreatedResponse<I>>) {
    (
        StatusCode::CREATED,
        Json(CreatedResponse { success: true, id }),
    )
}

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Routes that accept customer submissions (rate limited more tightly).
pub fn intake_routes() -> Router<AppState> {
    Router::new()
        .route("/contacts", post(contacts::create))
        .route("/orders/verify", post(orders::create))
}

/// Everything else.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .route("/contacts", get(contacts::index))
        .route("/orders/verify", get(orders::index))
        .route("/settings", get(settings::show).post(settings::save))
        .nest("/cart", cart_routes())
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new().merge(intake_routes()).merge(api_routes())
}
