//! Apply or revert the embedded job board schema migrations.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;
use std::io;

use clap::{Parser, Subcommand};
use jobboard::outbound::persistence::{revert_all_migrations, run_pending_migrations};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

/// `db-admin` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "db-admin", about = "Manage the job board database schema", version)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url", global = true)]
    database_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
enum Command {
    /// Apply pending migrations, creating the `jobs` table.
    Migrate,
    /// Revert every migration, dropping the `jobs` table.
    Reset,
}

fn main() -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let database_url = resolve_database_url(args.database_url)?;

    match args.command {
        Command::Migrate => {
            let applied = run_pending_migrations(&database_url).map_err(io::Error::other)?;
            info!(count = applied.len(), "migrations applied");
        }
        Command::Reset => {
            let reverted = revert_all_migrations(&database_url).map_err(io::Error::other)?;
            info!(count = reverted.len(), "migrations reverted");
        }
    }
    Ok(())
}

fn resolve_database_url(explicit: Option<String>) -> io::Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "--database-url must not be empty when provided",
            ));
        }
        return Ok(value);
    }

    let from_env = env::var("DATABASE_URL").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "database URL missing: set --database-url or DATABASE_URL",
        )
    })?;
    if from_env.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "DATABASE_URL must not be empty",
        ));
    }
    Ok(from_env)
}
