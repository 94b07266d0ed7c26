//! Analytics route handlers.
//!
//! Resets delete for real and report how many aggregate documents went.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::instrument;

use honey_palace_core::{AnalyticsKind, AnalyticsSummary};

use super::{DataResponse, ok};
use crate::error::Result;
use crate::services::ResetAllReport;
use crate::state::AppState;

/// Result of a single-collection reset.
#[derive(Debug, Serialize)]
pub struct ResetResult {
    pub kind: AnalyticsKind,
    pub deleted: u64,
}

/// Body of a reset-all response; `error` is present only on failure.
#[derive(Debug, Serialize)]
pub struct ResetAllResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub data: ResetAllReport,
}

/// Order summary for the dashboard.
///
/// GET /admin/analytics
#[instrument(skip(state))]
pub async fn summary(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<AnalyticsSummary>>> {
    let summary = state.analytics().summary().await?;
    Ok(ok(summary))
}

/// Wipe all three aggregate collections.
///
/// Responds 500 if any deletion failed; the others still took effect.
///
/// POST /admin/analytics/reset-all
#[instrument(skip(state))]
pub async fn reset_all(State(state): State<AppState>) -> Response {
    let report = state.analytics().reset_all().await;
    let error = report.failure_summary();
    let status = if error.is_some() {
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::OK
    };

    let body = ResetAllResponse {
        success: error.is_none(),
        error,
        data: report,
    };
    (status, Json(body)).into_response()
}

async fn reset_one(
    state: &AppState,
    kind: AnalyticsKind,
) -> Result<Json<DataResponse<ResetResult>>> {
    let deleted = state.analytics().reset(kind).await?;
    Ok(ok(ResetResult { kind, deleted }))
}

/// POST /admin/analytics/reset-customers
#[instrument(skip(state))]
pub async fn reset_customers(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<ResetResult>>> {
    reset_one(&state, AnalyticsKind::Customers).await
}

/// POST /admin/analytics/reset-orders
#[instrument(skip(state))]
pub async fn reset_orders(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<ResetResult>>> {
    reset_one(&state, AnalyticsKind::Orders).await
}

/// POST /admin/analytics/reset-products
#[instrument(skip(state))]
pub async fn reset_products(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<ResetResult>>> {
    reset_one(&state, AnalyticsKind::Products).await
}
