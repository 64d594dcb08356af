//! CLI module for the football pool service
//!
//! Subcommands:
//! - `serve`: HTTP API server (default)
//! - `migrate`: apply (or revert) the PostgreSQL schema and exit
//! - `seed`: insert the demo teams and game and exit

pub mod migrate;
pub mod seed;
pub mod serve;

use clap::{Parser, Subcommand};

use crate::config::AppConfig;
use crate::infrastructure::observability::init_tracing;

/// Football Pool API - teams, games, betting lines and weekly schedules
#[derive(Parser)]
#[command(name = "football-pool")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default)
    Serve,

    /// Apply pending schema migrations
    Migrate(migrate::MigrateArgs),

    /// Insert demo data
    Seed,
}

/// Load `.env` and layered configuration, then install logging
pub(crate) fn bootstrap() -> anyhow::Result<AppConfig> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load()?;
    init_tracing(&config.logging, &config.observability.tracing);

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_default_command() {
        let cli = Cli::try_parse_from(["football-pool"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_migrate_revert() {
        let cli = Cli::try_parse_from(["football-pool", "migrate", "--revert"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Migrate(migrate::MigrateArgs { revert: true }))
        ));
    }

    #[test]
    fn test_parse_unknown_command_fails() {
        assert!(Cli::try_parse_from(["football-pool", "ui"]).is_err());
    }
}
