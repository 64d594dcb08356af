//! Migrate command - applies the schema to the configured database

use clap::Args;
use tracing::info;

use crate::infrastructure::storage::{Migrator, PostgresMigrator, StorageFactory};

#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Revert the most recently applied migration instead
    #[arg(long)]
    pub revert: bool,
}

pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let pool = StorageFactory::connect(&config.storage).await?;
    let migrator = PostgresMigrator::new(pool.clone());

    if args.revert {
        migrator.revert().await?;
        let version = migrator.version().await?;
        info!(?version, "Revert complete");
    } else {
        let applied = migrator.run().await?;
        let version = migrator.version().await?;
        info!(applied, ?version, "Migrations complete");
    }

    pool.close().await;
    Ok(())
}
