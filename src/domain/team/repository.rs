//! Team repository trait

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::Team;
use crate::domain::entity::EntityId;
use crate::domain::DomainError;

/// Repository for team persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TeamRepository: Send + Sync {
    /// Get a team by its id
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Team>, DomainError>;

    /// List every team ordered by id
    async fn find_all(&self) -> Result<Vec<Team>, DomainError>;

    /// Insert a team without an id, or overwrite the stored team with the same id.
    /// Returns the stored team, carrying its generated id.
    async fn save(&self, team: Team) -> Result<Team, DomainError>;

    /// Delete a team, returns true if it existed
    async fn delete_by_id(&self, id: EntityId) -> Result<bool, DomainError>;

    /// Get the team with exactly this team name
    async fn get_team_by_team_name(&self, team_name: &str) -> Result<Option<Team>, DomainError>;

    /// Get the first team (lowest id) from this city
    async fn get_team_by_city(&self, city: &str) -> Result<Option<Team>, DomainError>;

    /// Count all teams
    async fn count(&self) -> Result<u64, DomainError>;
}
