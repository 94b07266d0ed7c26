//! Contact form route handlers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
};
use chrono::Utc;
use tracing::instrument;

use honey_palace_core::{ContactId, NewContact};
use honey_palace_store::{Collection, Document, SortOrder};

use super::{ApiJson, CreatedResponse, DataResponse, created, ok};
use crate::error::{Result, add_breadcrumb};
use crate::state::AppState;

/// Store a contact form submission.
///
/// POST /contacts
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<NewContact>,
) -> Result<(StatusCode, Json<CreatedResponse<ContactId>>)> {
    let contact = payload.validate()?;

    let id = state
        .store()
        .insert(Collection::Contacts, contact.into_document(), Utc::now())
        .await?;

    tracing::info!(contact_id = %id, "Contact message received");
    add_breadcrumb("contact", "Submitted contact form", None);

    Ok(created(id.cast()))
}

/// List contact submissions, newest first.
///
/// GET /contacts
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<DataResponse<Vec<Document>>>> {
    let contacts = state
        .store()
        .find_all(Collection::Contacts, SortOrder::NewestFirst)
        .await?;
    Ok(ok(contacts))
}
