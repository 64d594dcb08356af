//! Game entity

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::validation::{
    validate_line, validate_over_under, validate_week_number, GameValidationError,
};
use crate::domain::entity::{EntityId, Identified};
use crate::domain::team::Team;

/// A scheduled matchup with its betting line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    id: Option<EntityId>,
    home_team: Team,
    visiting_team: Team,
    /// `None` when the line is even
    favorite_team: Option<Team>,
    start_date_time: NaiveDateTime,
    week_number: i32,
    line: f64,
    over_under: f64,
}

impl Game {
    /// Create a game that has not been persisted yet
    pub fn new(
        home_team: Team,
        visiting_team: Team,
        favorite_team: Option<Team>,
        start_date_time: NaiveDateTime,
        week_number: i32,
        line: f64,
        over_under: f64,
    ) -> Result<Self, GameValidationError> {
        validate_week_number(week_number)?;
        validate_line(line)?;
        validate_over_under(over_under)?;

        Ok(Self {
            id: None,
            home_team,
            visiting_team,
            favorite_team,
            start_date_time,
            week_number,
            line,
            over_under,
        })
    }

    /// Rebuild a game loaded from storage
    pub fn with_id(mut self, id: EntityId) -> Self {
        self.id = Some(id);
        self
    }

    // Getters

    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    pub fn home_team(&self) -> &Team {
        &self.home_team
    }

    pub fn visiting_team(&self) -> &Team {
        &self.visiting_team
    }

    pub fn favorite_team(&self) -> Option<&Team> {
        self.favorite_team.as_ref()
    }

    pub fn start_date_time(&self) -> NaiveDateTime {
        self.start_date_time
    }

    pub fn week_number(&self) -> i32 {
        self.week_number
    }

    pub fn line(&self) -> f64 {
        self.line
    }

    pub fn over_under(&self) -> f64 {
        self.over_under
    }

    pub fn is_even_line(&self) -> bool {
        self.favorite_team.is_none()
    }

    /// Overwrite every field except the identity with the values of `other`
    pub fn update_from(&mut self, other: Game) {
        self.home_team = other.home_team;
        self.visiting_team = other.visiting_team;
        self.favorite_team = other.favorite_team;
        self.start_date_time = other.start_date_time;
        self.week_number = other.week_number;
        self.line = other.line;
        self.over_under = other.over_under;
    }
}

impl Identified for Game {
    fn id(&self) -> Option<EntityId> {
        self.id
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}, week {}, {}",
            self.visiting_team, self.home_team, self.week_number, self.start_date_time
        )?;

        match &self.favorite_team {
            Some(favorite) => write!(f, ", {} by {}", favorite, self.line)?,
            None => write!(f, ", even")?,
        }

        write!(f, ", o/u {}", self.over_under)
    }
}
