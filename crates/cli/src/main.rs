//! Honey Palace CLI - migrations, seeding, and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! hp-cli migrate
//!
//! # Seed the catalog
//! hp-cli seed products seeds/products.yaml --clear
//!
//! # Order summary
//! hp-cli analytics summary
//!
//! # Wipe analytics aggregates
//! hp-cli analytics reset all
//! hp-cli analytics reset orders
//! ```
//!
//! All commands read `HONEY_PALACE_DATABASE_URL` (or `DATABASE_URL`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand, ValueEnum};

use honey_palace_core::AnalyticsKind;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "hp-cli")]
#[command(author, version, about = "Honey Palace CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed collections from files
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Analytics maintenance
    Analytics {
        #[command(subcommand)]
        action: AnalyticsAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert catalog products from a YAML file
    Products {
        /// Path to the YAML file
        file: String,

        /// Delete existing products first
        #[arg(long)]
        clear: bool,
    },
}

#[derive(Subcommand)]
enum AnalyticsAction {
    /// Show order totals
    Summary,
    /// Delete every document of one or all aggregate collections
    Reset {
        #[arg(value_enum)]
        target: ResetTarget,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ResetTarget {
    All,
    Customers,
    Orders,
    Products,
}

impl ResetTarget {
    const fn kind(self) -> Option<AnalyticsKind> {
        match self {
            Self::All => None,
            Self::Customers => Some(AnalyticsKind::Customers),
            Self::Orders => Some(AnalyticsKind::Orders),
            Self::Products => Some(AnalyticsKind::Products),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed { target } => match target {
            SeedTarget::Products { file, clear } => {
                commands::seed::products(&file, clear).await?;
            }
        },
        Commands::Analytics { action } => match action {
            AnalyticsAction::Summary => commands::analytics::summary().await?,
            AnalyticsAction::Reset { target } => {
                commands::analytics::reset(target.kind()).await?;
            }
        },
    }
    Ok(())
}
