//! Game repository trait and sortable properties

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use super::entity::Game;
use crate::domain::entity::{EntityId, Identified};
use crate::domain::paging::{Page, PageRequest, PagingError};
use crate::domain::DomainError;

/// Game properties a paged listing can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameSortField {
    Id,
    WeekNumber,
    StartDateTime,
    Line,
    OverUnder,
}

impl GameSortField {
    /// Parse the camelCase property name used on the wire
    pub fn parse(property: &str) -> Result<Self, PagingError> {
        match property.trim() {
            "id" => Ok(Self::Id),
            "weekNumber" => Ok(Self::WeekNumber),
            "startDateTime" => Ok(Self::StartDateTime),
            "line" => Ok(Self::Line),
            "overUnder" => Ok(Self::OverUnder),
            other => Err(PagingError::InvalidSortProperty(other.to_string())),
        }
    }

    /// Name used on the wire, the inverse of [`GameSortField::parse`]
    pub fn property(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::WeekNumber => "weekNumber",
            Self::StartDateTime => "startDateTime",
            Self::Line => "line",
            Self::OverUnder => "overUnder",
        }
    }

    pub fn column(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::WeekNumber => "week_number",
            Self::StartDateTime => "start_date_time",
            Self::Line => "line",
            Self::OverUnder => "over_under",
        }
    }
}

pub type GamePageRequest = PageRequest<GameSortField>;

/// Repository for game persistence
#[cfg_attr(test, automock)]
#[async_trait]
pub trait GameRepository: Send + Sync {
    /// Get a game by its id
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Game>, DomainError>;

    /// List every game ordered by id
    async fn find_all(&self) -> Result<Vec<Game>, DomainError>;

    /// List one page of games; ties in the requested order are broken by id
    async fn find_all_paged(&self, request: &GamePageRequest) -> Result<Page<Game>, DomainError>;

    /// Insert a game without an id, or overwrite the stored game with the same id.
    /// Every referenced team must already be persisted.
    async fn save(&self, game: Game) -> Result<Game, DomainError>;

    /// Delete a game, returns true if it existed
    async fn delete_by_id(&self, id: EntityId) -> Result<bool, DomainError>;

    /// All games played in the given week, ordered by start time then id
    async fn get_games_by_week_number(&self, week_number: i32) -> Result<Vec<Game>, DomainError>;

    /// Count all games
    async fn count(&self) -> Result<u64, DomainError>;
}

/// Reject a game whose teams have not been saved yet
pub fn ensure_teams_persisted(game: &Game) -> Result<(), DomainError> {
    let teams = [Some(game.home_team()), Some(game.visiting_team()), game.favorite_team()];

    for team in teams.into_iter().flatten() {
        if !team.is_persisted() {
            return Err(DomainError::validation(format!(
                "Team \"{}\" must be saved before it can be used in a game",
                team.full_team_name()
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::team::Team;
    use chrono::NaiveDate;

    #[test]
    fn test_sort_field_parse() {
        assert_eq!(GameSortField::parse("weekNumber").unwrap(), GameSortField::WeekNumber);
        assert_eq!(GameSortField::parse("overUnder").unwrap(), GameSortField::OverUnder);
        assert_eq!(GameSortField::parse(" id ").unwrap(), GameSortField::Id);
        assert!(matches!(
            GameSortField::parse("homeTeam; DROP TABLE game"),
            Err(PagingError::InvalidSortProperty(_))
        ));
    }

    #[test]
    fn test_sort_field_property_parses_back() {
        for field in [GameSortField::Id, GameSortField::StartDateTime, GameSortField::OverUnder] {
            assert_eq!(GameSortField::parse(field.property()).unwrap(), field);
        }
    }

    #[test]
    fn test_sort_field_column() {
        assert_eq!(GameSortField::StartDateTime.column(), "start_date_time");
        assert_eq!(GameSortField::Line.column(), "line");
    }

    #[test]
    fn test_ensure_teams_persisted() {
        let kickoff = NaiveDate::from_ymd_opt(2017, 2, 5)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap();
        let saved = Team::new("New England", "Patriots")
            .unwrap()
            .with_id(EntityId::new(1));
        let unsaved = Team::new("Atlanta", "Falcons").unwrap();

        let game = Game::new(saved.clone(), unsaved, None, kickoff, 19, 0.0, 50.0).unwrap();
        let err = ensure_teams_persisted(&game).unwrap_err();
        assert!(err.to_string().contains("Atlanta Falcons"));

        let game = Game::new(saved.clone(), saved, None, kickoff, 19, 0.0, 50.0).unwrap();
        assert!(ensure_teams_persisted(&game).is_ok());
    }
}
