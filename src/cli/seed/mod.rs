//! Seed command - inserts the demo teams and game

use tracing::info;

use crate::infrastructure::seed::seed_demo_data;
use crate::infrastructure::storage::StorageFactory;

pub async fn run() -> anyhow::Result<()> {
    let config = super::bootstrap()?;

    let repositories = StorageFactory::create(&config.storage).await?;
    let outcome =
        seed_demo_data(repositories.teams.as_ref(), repositories.games.as_ref()).await?;

    info!(
        teams_created = outcome.teams_created,
        games_created = outcome.games_created,
        "Demo data seeded"
    );

    if let Some(pool) = repositories.pool {
        pool.close().await;
    }

    Ok(())
}
