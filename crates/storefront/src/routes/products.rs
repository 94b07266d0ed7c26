//! Product route handlers.
//!
//! Products are read-only here; the catalog is loaded with `hp-cli seed`.

use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;

use honey_palace_core::{DocumentId, ProductId};
use honey_palace_store::{Collection, Document, SortOrder};

use super::{DataResponse, ok};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// List the catalog in the order it was loaded.
///
/// GET /products
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<Document>>>> {
    let products = state
        .store()
        .find_all(Collection::Products, SortOrder::OldestFirst)
        .await?;
    Ok(ok(products))
}

/// Fetch one product.
///
/// GET /products/{id}
///
/// A malformed id is a 400, an unknown one a 404.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DataResponse<Document>>> {
    let id = ProductId::parse(&id)?;

    let product = state
        .store()
        .find_by_id(Collection::Products, DocumentId::new(id.as_uuid()))
        .await?
        .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

    Ok(ok(product))
}
