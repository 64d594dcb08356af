//! PostgreSQL game repository implementation

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::postgres::PgRow;
use sqlx::PgPool;

use crate::domain::game::{
    ensure_teams_persisted, Game, GamePageRequest, GameRepository, GameSortField,
};
use crate::domain::{DomainError, EntityId, Page, SortDirection, Team};
use crate::infrastructure::storage::{map_read_error, map_write_error};
use crate::infrastructure::team::{column, team_from_columns};

/// Games joined with their three teams; the favorite may be absent
const SELECT_GAME: &str = r#"
    SELECT g.id, g.start_date_time, g.week_number, g.line, g.over_under,
           h.id AS home_id, h.city AS home_city, h.team_name AS home_team_name,
           v.id AS visiting_id, v.city AS visiting_city, v.team_name AS visiting_team_name,
           f.id AS favorite_id, f.city AS favorite_city, f.team_name AS favorite_team_name
    FROM game g
    JOIN team h ON h.id = g.home_team_id
    JOIN team v ON v.id = g.visiting_team_id
    LEFT JOIN team f ON f.id = g.favorite_team_id
"#;

/// PostgreSQL implementation of GameRepository
#[derive(Debug, Clone)]
pub struct PostgresGameRepository {
    pool: PgPool,
}

impl PostgresGameRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, game: Game) -> Result<Game, DomainError> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO game (home_team_id, visiting_team_id, favorite_team_id,
                              start_date_time, week_number, line, over_under)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(team_key(game.home_team()))
        .bind(team_key(game.visiting_team()))
        .bind(game.favorite_team().map(team_key))
        .bind(game.start_date_time())
        .bind(game.week_number())
        .bind(game.line())
        .bind(game.over_under())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "create game"))?;

        Ok(game.with_id(EntityId::new(id)))
    }

    async fn update(&self, id: EntityId, game: Game) -> Result<Game, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE game
            SET home_team_id = $2, visiting_team_id = $3, favorite_team_id = $4,
                start_date_time = $5, week_number = $6, line = $7, over_under = $8
            WHERE id = $1
            "#,
        )
        .bind(id.value())
        .bind(team_key(game.home_team()))
        .bind(team_key(game.visiting_team()))
        .bind(game.favorite_team().map(team_key))
        .bind(game.start_date_time())
        .bind(game.week_number())
        .bind(game.line())
        .bind(game.over_under())
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error(e, "update game"))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::not_found(format!("Game {} not found", id)));
        }

        Ok(game)
    }
}

#[async_trait]
impl GameRepository for PostgresGameRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Game>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE g.id = $1", SELECT_GAME))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "get game"))?;

        row.map(|row| row_to_game(&row)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Game>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY g.id", SELECT_GAME))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "list games"))?;

        rows.iter().map(row_to_game).collect()
    }

    async fn find_all_paged(&self, request: &GamePageRequest) -> Result<Page<Game>, DomainError> {
        let sql = format!(
            "{} ORDER BY {} LIMIT $1 OFFSET $2",
            SELECT_GAME,
            order_by_clause(request.sort(), request.direction())
        );

        let rows = sqlx::query(&sql)
            .bind(i64::from(request.size()))
            .bind(i64::try_from(request.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "list games page"))?;

        let content = rows.iter().map(row_to_game).collect::<Result<Vec<_>, _>>()?;
        let total = self.count().await?;

        Ok(Page::new(content, request, total))
    }

    async fn save(&self, game: Game) -> Result<Game, DomainError> {
        ensure_teams_persisted(&game)?;

        match game.id() {
            None => self.insert(game).await,
            Some(id) => self.update(id, game).await,
        }
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM game WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error(e, "delete game"))?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_games_by_week_number(&self, week_number: i32) -> Result<Vec<Game>, DomainError> {
        let rows = sqlx::query(&format!(
            "{} WHERE g.week_number = $1 ORDER BY g.start_date_time, g.id",
            SELECT_GAME
        ))
        .bind(week_number)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_read_error(e, "list games by week"))?;

        rows.iter().map(row_to_game).collect()
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM game")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "count games"))?;

        Ok(count as u64)
    }
}

/// Only called after `ensure_teams_persisted`, so the id is present
fn team_key(team: &Team) -> Option<i64> {
    team.id().map(|id| id.value())
}

/// ORDER BY built from whitelisted columns in the requested order, then the
/// id tie-breaker unless id was requested
fn order_by_clause(sort: &[GameSortField], direction: SortDirection) -> String {
    let mut parts: Vec<String> = sort
        .iter()
        .map(|field| format!("g.{} {}", field.column(), direction.as_sql()))
        .collect();

    if !sort.contains(&GameSortField::Id) {
        parts.push("g.id ASC".to_string());
    }

    parts.join(", ")
}

fn row_to_game(row: &PgRow) -> Result<Game, DomainError> {
    let id: i64 = column(row, "id")?;
    let start_date_time: NaiveDateTime = column(row, "start_date_time")?;
    let week_number: i32 = column(row, "week_number")?;
    let line: f64 = column(row, "line")?;
    let over_under: f64 = column(row, "over_under")?;

    let home_team = team_from_columns(
        column(row, "home_id")?,
        column(row, "home_city")?,
        column(row, "home_team_name")?,
    )?;
    let visiting_team = team_from_columns(
        column(row, "visiting_id")?,
        column(row, "visiting_city")?,
        column(row, "visiting_team_name")?,
    )?;

    let favorite_id: Option<i64> = column(row, "favorite_id")?;
    let favorite_team = match favorite_id {
        Some(favorite_id) => Some(team_from_columns(
            favorite_id,
            column(row, "favorite_city")?,
            column(row, "favorite_team_name")?,
        )?),
        None => None,
    };

    Game::new(
        home_team,
        visiting_team,
        favorite_team,
        start_date_time,
        week_number,
        line,
        over_under,
    )
    .map(|game| game.with_id(EntityId::new(id)))
    .map_err(|e| DomainError::storage(format!("Invalid game {} in database: {}", id, e)))
}
