//! Team entity

use serde::{Deserialize, Serialize};

use super::validation::{validate_city, validate_team_name, TeamValidationError};
use crate::domain::entity::{EntityId, Identified};

/// A football team, e.g. city "New England" with team name "Patriots"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    id: Option<EntityId>,
    city: String,
    team_name: String,
}

impl Team {
    /// Create a team that has not been persisted yet
    pub fn new(
        city: impl Into<String>,
        team_name: impl Into<String>,
    ) -> Result<Self, TeamValidationError> {
        let city = city.into();
        let team_name = team_name.into();

        validate_city(&city)?;
        validate_team_name(&team_name)?;

        Ok(Self {
            id: None,
            city,
            team_name,
        })
    }

    /// Rebuild a team loaded from storage
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    // Getters

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn team_name(&self) -> &str {
        &self.team_name
    }

    /// City and name joined by a single space
    pub fn full_team_name(&self) -> String {
        format!("{} {}", self.city, self.team_name)
    }

    // Mutators

    pub fn set_city(&mut self, city: impl Into<String>) -> Result<(), TeamValidationError> {
        let city = city.into();
        validate_city(&city)?;
        self.city = city;
        Ok(())
    }

    pub fn set_team_name(&mut self, team_name: impl Into<String>) -> Result<(), TeamValidationError> {
        let team_name = team_name.into();
        validate_team_name(&team_name)?;
        self.team_name = team_name;
        Ok(())
    }
}

impl Identified for Team {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.city, self.team_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_creation() {
        let team = Team::new("New England", "Patriots").unwrap();

        assert_eq!(team.city(), "New England");
        assert_eq!(team.team_name(), "Patriots");
        assert!(team.id().is_none());
        assert!(!team.is_persisted());
    }

    #[test]
    fn test_full_team_name() {
        let team = Team::new("Atlanta", "Falcons").unwrap();
        assert_eq!(team.full_team_name(), "Atlanta Falcons");
        assert_eq!(team.to_string(), team.full_team_name());
    }

    #[test]
    fn test_full_team_name_keeps_inner_spaces() {
        let team = Team::new("Los Angeles", "Football Team").unwrap();
        assert_eq!(team.full_team_name(), "Los Angeles Football Team");
    }

    #[test]
    fn test_team_rejects_blank_fields() {
        assert_eq!(
            Team::new("", "Patriots").unwrap_err(),
            TeamValidationError::EmptyCity
        );
        assert_eq!(
            Team::new("Atlanta", " ").unwrap_err(),
            TeamValidationError::EmptyTeamName
        );
    }

    #[test]
    fn test_with_id() {
        let team = Team::new("Atlanta", "Falcons")
            .unwrap()
            .with_id(EntityId::new(9));

        assert_eq!(team.id(), Some(EntityId::new(9)));
        assert!(team.is_persisted());
    }

    #[test]
    fn test_setters_validate() {
        let mut team = Team::new("Oakland", "Raiders").unwrap();

        team.set_city("Las Vegas").unwrap();
        assert_eq!(team.full_team_name(), "Las Vegas Raiders");

        assert!(team.set_team_name("").is_err());
        assert_eq!(team.team_name(), "Raiders");
    }
}
