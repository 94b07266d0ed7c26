//! Site settings route handlers.
//!
//! There is one settings document. Saving merges the submitted fields over
//! whatever is stored; concurrent saves are last-writer-wins.

use axum::{Json, extract::State};
use serde_json::{Map, Value};
use tracing::instrument;

use honey_palace_core::SettingsPatch;

use super::{ApiJson, DataResponse, ok};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// The settings document, or `null` if none has been saved.
///
/// GET /settings
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<Option<Map<String, Value>>>>> {
    let settings = state.store().get_settings().await?;
    Ok(ok(settings))
}

/// Merge recognized fields into the settings document.
///
/// POST /settings
#[instrument(skip_all)]
pub async fn save(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SettingsPatch>,
) -> Result<Json<DataResponse<Map<String, Value>>>> {
    let patch = payload.validate()?;
    if patch.is_empty() {
        return Err(AppError::BadRequest(
            "no recognized settings fields provided".to_string(),
        ));
    }

    let document = patch.into_document();
    tracing::debug!(fields = ?document.keys().collect::<Vec<_>>(), "Merging settings");

    let merged = state.store().merge_settings(document).await?;

    tracing::info!(stored_fields = merged.len(), "Settings saved");
    Ok(ok(merged))
}
