//! Command implementations.
//!
//! Every command talks to `PostgreSQL`; the in-memory backend has nothing to
//! migrate, seed, or reset.

pub mod analytics;
pub mod migrate;
pub mod seed;

use honey_palace_store::StoreError;
use secrecy::SecretString;
use sqlx::PgPool;
use thiserror::Error;

/// Errors surfaced by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("{0}")]
    Store(#[from] StoreError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid seed file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid seed entry #{index}: {reason}")]
    InvalidSeed { index: usize, reason: String },

    #[error("Analytics reset failed: {0}")]
    ResetFailed(String),
}

/// Database URL from `HONEY_PALACE_DATABASE_URL`, falling back to `DATABASE_URL`.
fn database_url() -> Result<SecretString, CliError> {
    // Load .env file if present (ignore errors if not found)
    let _ = dotenvy::dotenv();

    std::env::var("HONEY_PALACE_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| CliError::MissingEnvVar("HONEY_PALACE_DATABASE_URL"))
}

/// Connect to the database named by the environment.
async fn connect() -> Result<PgPool, CliError> {
    let url = database_url()?;
    tracing::info!("Connecting to database...");
    let pool = honey_palace_store::create_pool(&url)
        .await
        .map_err(StoreError::from)?;
    Ok(pool)
}
