//! Application state shared by every handler

use std::sync::Arc;

use crate::domain::{GameRepository, TeamRepository};
use crate::infrastructure::game::GameService;
use crate::infrastructure::storage::Repositories;

/// Repositories, the game service and the prefix used to build resource links
#[derive(Clone)]
pub struct AppState {
    pub team_repository: Arc<dyn TeamRepository>,
    pub game_repository: Arc<dyn GameRepository>,
    pub game_service: Arc<GameService>,
    base_path: Arc<str>,
}

impl AppState {
    pub fn new(repositories: Repositories, base_path: impl Into<String>) -> Self {
        let game_service = Arc::new(GameService::new(repositories.teams.clone()));

        Self {
            team_repository: repositories.teams,
            game_repository: repositories.games,
            game_service,
            base_path: Arc::from(base_path.into()),
        }
    }

    /// State over empty in-memory repositories
    pub fn in_memory(base_path: impl Into<String>) -> Self {
        Self::new(Repositories::in_memory(), base_path)
    }

    /// Normalized route prefix, empty when routes are mounted at the root
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Absolute path of a resource below the base path
    pub fn link(&self, path: &str) -> String {
        format!("{}{}", self.base_path, path)
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("base_path", &self.base_path)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_prefixes_base_path() {
        let state = AppState::in_memory("/footballpool");
        assert_eq!(state.link("/games/3"), "/footballpool/games/3");

        let root = AppState::in_memory("");
        assert_eq!(root.link("/teams"), "/teams");
    }
}
