//! Analytics maintenance commands.

use std::sync::Arc;

use tracing::{error, info};

use honey_palace_admin::services::AnalyticsService;
use honey_palace_core::AnalyticsKind;
use honey_palace_store::PgDocumentStore;

use super::{CliError, connect};

async fn service() -> Result<AnalyticsService, CliError> {
    let store = PgDocumentStore::new(connect().await?);
    Ok(AnalyticsService::new(Arc::new(store)))
}

/// Print the order summary.
///
/// # Errors
///
/// Returns error if the orders collection cannot be read.
pub async fn summary() -> Result<(), CliError> {
    let summary = service().await?.summary().await?;

    info!("Order Summary");
    info!("=============");
    info!("Total orders:   {}", summary.total_orders);
    info!("Total revenue:  {}", summary.total_revenue.display());
    info!("Shipped:        {}", summary.shipped_orders);
    info!("Pending:        {}", summary.pending_orders);
    Ok(())
}

/// Wipe one aggregate collection, or all three when `kind` is `None`.
///
/// # Errors
///
/// Returns error if any deletion fails. With `None`, the deletions that did
/// succeed are not undone.
pub async fn reset(kind: Option<AnalyticsKind>) -> Result<(), CliError> {
    let service = service().await?;

    if let Some(kind) = kind {
        let deleted = service.reset(kind).await?;
        info!("Reset {kind}: {deleted} documents deleted");
        return Ok(());
    }

    let report = service.reset_all().await;
    for (kind, outcome) in report.outcomes() {
        match outcome.error() {
            None => info!(%kind, "Reset succeeded"),
            Some(e) => error!(%kind, error = %e, "Reset failed"),
        }
    }
    report
        .failure_summary()
        .map_or(Ok(()), |failures| Err(CliError::ResetFailed(failures)))
}
