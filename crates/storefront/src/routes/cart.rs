//! Cart route handlers.
//!
//! The cart is a JSON array kept under the `"cart"` key of the visitor's
//! session. Each request copies that raw slot into a [`MemoryStorage`], runs
//! the [`CartStore`] operation over it, and writes the slot back.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use honey_palace_core::cart::CART_SLOT;
use honey_palace_core::{CartItem, CartStorage, CartStore, MemoryStorage, Price, ProductRef};

use super::{ApiJson, DataResponse, ok};
use crate::error::{AppError, Result};

/// Cart contents as returned to the client.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub item_count: u32,
    pub subtotal: Price,
}

impl<S: CartStorage> From<&CartStore<S>> for CartView {
    fn from(cart: &CartStore<S>) -> Self {
        Self {
            items: cart.get_cart(),
            item_count: cart.item_count(),
            subtotal: cart.subtotal(),
        }
    }
}

/// Unit count for the cart badge.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: u32,
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product: ProductRef,
    /// Defaults to one unit.
    #[serde(default)]
    pub quantity: Option<u32>,
}

/// Update quantity request body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub id: String,
    pub quantity: u32,
}

/// Remove line request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Load the session's cart slot into a cart store.
async fn load_cart(session: &Session) -> Result<CartStore<MemoryStorage>> {
    let raw = session.get::<String>(CART_SLOT).await?;
    let storage = raw.map_or_else(MemoryStorage::new, |raw| {
        MemoryStorage::new().with_item(CART_SLOT, raw)
    });
    Ok(CartStore::new(storage))
}

/// Write the cart slot back to the session, removing it if the cart cleared it.
async fn save_cart(session: &Session, cart: CartStore<MemoryStorage>) -> Result<()> {
    match cart.into_storage().into_item(CART_SLOT) {
        Some(raw) => session.insert(CART_SLOT, raw).await?,
        None => {
            session.remove::<String>(CART_SLOT).await?;
        }
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
///
/// GET /cart
#[instrument(skip_all)]
pub async fn show(session: Session) -> Result<Json<DataResponse<CartView>>> {
    let cart = load_cart(&session).await?;
    Ok(ok(CartView::from(&cart)))
}

/// Add a product, merging into an existing line with the same identifier.
///
/// POST /cart/add
#[instrument(skip_all, fields(product_id = tracing::field::Empty))]
pub async fn add(
    session: Session,
    ApiJson(request): ApiJson<AddToCartRequest>,
) -> Result<Json<DataResponse<CartView>>> {
    if let Some(id) = request.product.identifier() {
        tracing::Span::current().record("product_id", id);
    }

    if request.product.price.exceeds_accepted() {
        return Err(AppError::BadRequest("price is out of range".to_string()));
    }

    let mut cart = load_cart(&session).await?;
    match request.quantity {
        None => cart.add_one(&request.product),
        Some(0) => {
            return Err(AppError::BadRequest(
                "quantity must be at least 1".to_string(),
            ));
        }
        Some(quantity) => cart.add_to_cart(&request.product, quantity),
    }

    let view = CartView::from(&cart);
    save_cart(&session, cart).await?;

    tracing::info!(item_count = view.item_count, "Added to cart");
    Ok(ok(view))
}

/// Set a line's quantity; zero removes it.
///
/// POST /cart/update
#[instrument(skip_all, fields(id = %request.id, quantity = request.quantity))]
pub async fn update(
    session: Session,
    ApiJson(request): ApiJson<UpdateCartRequest>,
) -> Result<Json<DataResponse<CartView>>> {
    let mut cart = load_cart(&session).await?;
    if !cart.update_quantity(&request.id, request.quantity) {
        return Err(AppError::NotFound("Cart item".to_string()));
    }

    let view = CartView::from(&cart);
    save_cart(&session, cart).await?;
    Ok(ok(view))
}

/// Remove a line.
///
/// POST /cart/remove
#[instrument(skip_all, fields(id = %request.id))]
pub async fn remove(
    session: Session,
    ApiJson(request): ApiJson<RemoveFromCartRequest>,
) -> Result<Json<DataResponse<CartView>>> {
    let mut cart = load_cart(&session).await?;
    if !cart.remove_from_cart(&request.id) {
        return Err(AppError::NotFound("Cart item".to_string()));
    }

    let view = CartView::from(&cart);
    save_cart(&session, cart).await?;
    Ok(ok(view))
}

/// Empty the cart.
///
/// POST /cart/clear
#[instrument(skip_all)]
pub async fn clear(session: Session) -> Result<Json<DataResponse<CartView>>> {
    let mut cart = load_cart(&session).await?;
    cart.clear_cart();

    let view = CartView::from(&cart);
    save_cart(&session, cart).await?;
    Ok(ok(view))
}

/// Total units in the cart.
///
/// GET /cart/count
#[instrument(skip_all)]
pub async fn count(session: Session) -> Result<Json<DataResponse<CartCount>>> {
    let cart = load_cart(&session).await?;
    Ok(ok(CartCount {
        count: cart.item_count(),
    }))
}
