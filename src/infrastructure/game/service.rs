//! Game service: turns a request naming teams into a validated game

use std::sync::Arc;

use chrono::NaiveDateTime;
use serde::Deserialize;
use tracing::{debug, warn};
use validator::{Validate, ValidationErrors};

use crate::domain::game::Game;
use crate::domain::team::{Team, TeamRepository};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_validation_failure;

const ISSUE_SUMMARY_HEADER: &str = "Game cannot be created for the following reasons:\n";

/// Incoming game description; teams are referenced by name
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GameRequest {
    #[validate(length(min = 1, message = "homeTeamName must not be empty"))]
    pub home_team_name: String,
    #[validate(length(min = 1, message = "visitingTeamName must not be empty"))]
    pub visiting_team_name: String,
    /// Absent for an even line
    #[serde(default)]
    #[validate(length(min = 1, message = "favoriteTeamName must not be empty"))]
    pub favorite_team_name: Option<String>,
    pub start_date_time: NaiveDateTime,
    #[validate(range(min = 0, message = "weekNumber must not be negative"))]
    pub week_number: i32,
    #[validate(range(min = 0.0, message = "line must not be negative"))]
    pub line: f64,
    #[validate(range(min = 0.0, message = "overUnder must not be negative"))]
    pub over_under: f64,
}

/// Outcome of building a game from a request
///
/// Holds either the constructed game or the reasons it could not be built,
/// never both.
#[derive(Debug, Clone, Default)]
pub struct GameCreationResult {
    created_game: Option<Game>,
    validation_issues: Vec<String>,
}

impl GameCreationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created_game(&self) -> Option<&Game> {
        self.created_game.as_ref()
    }

    pub fn into_game(self) -> Option<Game> {
        self.created_game
    }

    pub fn validation_issues(&self) -> &[String] {
        &self.validation_issues
    }

    pub fn has_validation_issues(&self) -> bool {
        !self.validation_issues.is_empty()
    }

    /// Record a reason the game cannot be created
    pub fn add_validation_issue(&mut self, issue: impl Into<String>) -> Result<(), DomainError> {
        let issue = issue.into();

        if issue.trim().is_empty() {
            return Err(DomainError::validation("Validation issue must not be blank"));
        }

        self.created_game = None;
        self.validation_issues.push(issue);
        Ok(())
    }

    /// Header line followed by one line per issue
    pub fn validation_issue_summary(&self) -> String {
        let mut summary = String::from(ISSUE_SUMMARY_HEADER);
        for issue in &self.validation_issues {
            summary.push_str(issue);
            summary.push('\n');
        }
        summary
    }

    fn set_created_game(&mut self, game: Game) {
        if !self.has_validation_issues() {
            self.created_game = Some(game);
        }
    }
}

/// Resolves team names and builds games
#[derive(Clone)]
pub struct GameService {
    teams: Arc<dyn TeamRepository>,
}

impl std::fmt::Debug for GameService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameService").finish_non_exhaustive()
    }
}

impl GameService {
    pub fn new(teams: Arc<dyn TeamRepository>) -> Self {
        Self { teams }
    }

    /// Validate a request and build the game it describes.
    ///
    /// Unknown team names and out-of-range attributes are reported as issues on
    /// the result. Repository failures are returned as errors.
    pub async fn create_game_from_request(
        &self,
        request: &GameRequest,
    ) -> Result<GameCreationResult, DomainError> {
        let mut result = GameCreationResult::new();

        if let Err(errors) = request.validate() {
            for issue in field_issues(&errors) {
                result.add_validation_issue(issue)?;
            }
        }

        let home_team = self.lookup(&request.home_team_name, &mut result).await?;
        let visiting_team = self.lookup(&request.visiting_team_name, &mut result).await?;
        let favorite_team = match request.favorite_team_name.as_deref() {
            Some(name) => self.lookup(name, &mut result).await?,
            None => None,
        };

        if result.has_validation_issues() {
            warn!(
                issues = result.validation_issues().len(),
                "Game request rejected"
            );
            record_validation_failure("game");
            return Ok(result);
        }

        let (Some(home_team), Some(visiting_team)) = (home_team, visiting_team) else {
            return Err(DomainError::internal("Resolved teams missing without issues"));
        };

        match Game::new(
            home_team,
            visiting_team,
            favorite_team,
            request.start_date_time,
            request.week_number,
            request.line,
            request.over_under,
        ) {
            Ok(game) => {
                debug!(game = %game, "Game built from request");
                result.set_created_game(game);
            }
            Err(e) => {
                record_validation_failure("game");
                result.add_validation_issue(e.to_string())?;
            }
        }

        Ok(result)
    }

    async fn lookup(
        &self,
        team_name: &str,
        result: &mut GameCreationResult,
    ) -> Result<Option<Team>, DomainError> {
        if team_name.is_empty() {
            return Ok(None);
        }

        let team = self.teams.get_team_by_team_name(team_name).await?;
        if team.is_none() {
            result.add_validation_issue(format!(
                "A team with name \"{}\" does not exist.",
                team_name
            ))?;
        }

        Ok(team)
    }
}

/// Flatten validator errors into messages, ordered by field name
fn field_issues(errors: &ValidationErrors) -> Vec<String> {
    let mut fields: Vec<(String, Vec<String>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errors)| {
            let field = field.to_string();
            let messages = errors
                .iter()
                .map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
                .collect();
            (field, messages)
        })
        .collect();

    fields.sort_by(|a, b| a.0.cmp(&b.0));
    fields.into_iter().flat_map(|(_, messages)| messages).collect()
}
