//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! hp-cli migrate
//! ```
//!
//! Migrations are embedded from `crates/store/migrations/` and create the
//! `documents`, `site_settings`, and `tower_sessions.session` tables.

use tracing::info;

use super::{CliError, connect};

/// Apply pending migrations.
///
/// # Errors
///
/// Returns error if the database is unreachable or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;

    info!("Running migrations...");
    honey_palace_store::run_migrations(&pool).await?;

    info!("Migrations complete!");
    Ok(())
}
