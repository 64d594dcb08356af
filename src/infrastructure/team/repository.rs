//! In-memory team repository

use std::collections::BTreeMap;
use std::fmt::Debug;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::team::{Team, TeamRepository};
use crate::domain::{DomainError, EntityId};

/// Another store holding references to teams, checked before a team is removed
#[async_trait]
pub trait TeamReferences: Send + Sync + Debug {
    async fn is_team_referenced(&self, team_id: EntityId) -> bool;
}

/// Thread-safe in-memory team repository
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug, Default)]
pub struct InMemoryTeamRepository {
    teams: RwLock<BTreeMap<i64, Team>>,
    sequence: AtomicI64,
    references: Option<Arc<dyn TeamReferences>>,
}

impl InMemoryTeamRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse to delete teams that `references` still points at
    pub fn with_references(mut self, references: Arc<dyn TeamReferences>) -> Self {
        self.references = Some(references);
        self
    }

    fn next_id(&self) -> EntityId {
        EntityId::new(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

fn name_taken(teams: &BTreeMap<i64, Team>, team: &Team) -> bool {
    teams
        .values()
        .any(|t| t.team_name() == team.team_name() && t.id() != team.id())
}

#[async_trait]
impl TeamRepository for InMemoryTeamRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.get(&id.value()).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Team>, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.values().cloned().collect())
    }

    async fn save(&self, team: Team) -> Result<Team, DomainError> {
        let mut teams = self.teams.write().await;

        if name_taken(&teams, &team) {
            return Err(DomainError::conflict(format!(
                "Team '{}' already exists",
                team.team_name()
            )));
        }

        let id = match team.id() {
            Some(id) if !teams.contains_key(&id.value()) => {
                return Err(DomainError::not_found(format!("Team {} not found", id)));
            }
            Some(id) => id,
            None => self.next_id(),
        };

        let team = team.with_id(id);
        teams.insert(id.value(), team.clone());

        Ok(team)
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        if let Some(references) = &self.references {
            if references.is_team_referenced(id).await {
                return Err(DomainError::conflict(format!(
                    "Team {} is still referenced by a game",
                    id
                )));
            }
        }

        let mut teams = self.teams.write().await;
        Ok(teams.remove(&id.value()).is_some())
    }

    async fn get_team_by_team_name(&self, team_name: &str) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.values().find(|t| t.team_name() == team_name).cloned())
    }

    async fn get_team_by_city(&self, city: &str) -> Result<Option<Team>, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.values().find(|t| t.city() == city).cloned())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let teams = self.teams.read().await;
        Ok(teams.len() as u64)
    }
}
