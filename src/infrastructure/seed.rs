//! Demo data: the two Super Bowl LI teams and their week 19 game

use chrono::{NaiveDate, NaiveDateTime};
use tracing::info;

use crate::domain::{DomainError, Game, GameRepository, Team, TeamRepository};

const SUPER_BOWL_WEEK: i32 = 19;

/// What a seeding run inserted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedOutcome {
    pub teams_created: usize,
    pub games_created: usize,
}

/// Insert the demo teams and game if they are missing. Safe to run repeatedly.
pub async fn seed_demo_data(
    teams: &dyn TeamRepository,
    games: &dyn GameRepository,
) -> Result<SeedOutcome, DomainError> {
    let mut outcome = SeedOutcome::default();

    let home = find_or_create_team(teams, "New England", "Patriots", &mut outcome).await?;
    let visiting = find_or_create_team(teams, "Atlanta", "Falcons", &mut outcome).await?;

    if games.get_games_by_week_number(SUPER_BOWL_WEEK).await?.is_empty() {
        let game = Game::new(
            home.clone(),
            visiting,
            Some(home),
            super_bowl_kickoff()?,
            SUPER_BOWL_WEEK,
            3.0,
            56.5,
        )
        .map_err(|e| DomainError::internal(format!("Invalid demo game: {}", e)))?;

        let game = games.save(game).await?;
        info!(game = %game, "Seeded demo game");
        outcome.games_created += 1;
    }

    Ok(outcome)
}

async fn find_or_create_team(
    teams: &dyn TeamRepository,
    city: &str,
    team_name: &str,
    outcome: &mut SeedOutcome,
) -> Result<Team, DomainError> {
    if let Some(team) = teams.get_team_by_team_name(team_name).await? {
        return Ok(team);
    }

    let team = Team::new(city, team_name)
        .map_err(|e| DomainError::internal(format!("Invalid demo team: {}", e)))?;
    let team = teams.save(team).await?;

    info!(team = %team, "Seeded demo team");
    outcome.teams_created += 1;
    Ok(team)
}

/// Super Bowl LI kickoff, 6:30 PM Eastern
fn super_bowl_kickoff() -> Result<NaiveDateTime, DomainError> {
    NaiveDate::from_ymd_opt(2017, 2, 5)
        .and_then(|date| date.and_hms_opt(18, 30, 0))
        .ok_or_else(|| DomainError::internal("Invalid demo kickoff time"))
}
