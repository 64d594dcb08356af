//! Football Pool API
//!
//! REST backend for a football pool:
//! - Teams and the games played between them
//! - Betting line, over/under and favorite team per game
//! - Weekly schedules and paged, sorted game listings
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use tracing::info;

use api::state::AppState;
use infrastructure::seed::seed_demo_data;
use infrastructure::storage::StorageFactory;

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {}", config.storage.backend);

    let repositories = StorageFactory::create(&config.storage).await?;

    if config.storage.seed_demo_data {
        let outcome =
            seed_demo_data(repositories.teams.as_ref(), repositories.games.as_ref()).await?;
        info!(
            teams_created = outcome.teams_created,
            games_created = outcome.games_created,
            "Demo data ready"
        );
    }

    Ok(AppState::new(
        repositories,
        config.server.normalized_base_path(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_in_memory_state_with_demo_data() {
        let mut config = AppConfig::default();
        config.storage.backend = "in_memory".to_string();
        config.storage.seed_demo_data = true;
        config.server.base_path = "pool/".to_string();

        let state = create_app_state_with_config(&config).await.unwrap();

        assert_eq!(state.base_path(), "/pool");
        assert_eq!(state.team_repository.count().await.unwrap(), 2);
        assert_eq!(
            state.game_repository.get_games_by_week_number(19).await.unwrap().len(),
            1
        );
    }
}
