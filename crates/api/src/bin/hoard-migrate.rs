//! Schema migration tool.
//!
//! ```bash
//! hoard-migrate up
//! hoard-migrate down --target 20230404151000
//! hoard-migrate status
//! ```
//!
//! The database is taken from `--database-url` or `DATABASE_URL`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser, Debug)]
#[clap(name = "hoard-migrate")]
#[clap(about = "Apply, revert or inspect the treasure schema migrations")]
#[clap(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// PostgreSQL connection string
    #[clap(long, env = "DATABASE_URL")]
    database_url: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Apply every pending migration
    Up,
    /// Revert applied migrations newer than the target version
    Down {
        /// Version to roll back to; 0 reverts everything
        #[clap(long)]
        target: i64,
    },
    /// List embedded migrations and whether each is applied
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hoard_migrate=info,hoard_db=info,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let pool = hoard_db::create_pool(&args.database_url)
        .await
        .context("Failed to connect to database")?;

    match args.command {
        Command::Up => {
            hoard_db::run_migrations(&pool)
                .await
                .context("Failed to apply migrations")?;
            tracing::info!("Migrations applied");
        }
        Command::Down { target } => {
            hoard_db::revert_migrations(&pool, target)
                .await
                .with_context(|| format!("Failed to revert migrations to {target}"))?;
            tracing::info!(target, "Migrations reverted");
        }
        Command::Status => {
            let statuses = hoard_db::migration_status(&pool)
                .await
                .context("Failed to read migration status")?;
            for status in statuses {
                let state = if status.applied { "applied" } else { "pending" };
                println!("{:<16} {:<8} {}", status.version, state, status.description);
            }
        }
    }

    pool.close().await;
    Ok(())
}
