//! PostgreSQL team repository implementation

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use crate::domain::team::{Team, TeamRepository};
use crate::domain::{DomainError, EntityId};
use crate::infrastructure::storage::{map_read_error, map_write_error};

const SELECT_TEAM: &str = "SELECT id, city, team_name FROM team";

/// PostgreSQL implementation of TeamRepository
#[derive(Debug, Clone)]
pub struct PostgresTeamRepository {
    pool: PgPool,
}

impl PostgresTeamRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn fetch_one_where(
        &self,
        predicate: &str,
        value: &str,
    ) -> Result<Option<Team>, DomainError> {
        let sql = format!("{} WHERE {} = $1 ORDER BY id LIMIT 1", SELECT_TEAM, predicate);

        let row = sqlx::query(&sql)
            .bind(value)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "get team"))?;

        row.map(|row| row_to_team(&row)).transpose()
    }
}

#[async_trait]
impl TeamRepository for PostgresTeamRepository {
    async fn find_by_id(&self, id: EntityId) -> Result<Option<Team>, DomainError> {
        let row = sqlx::query(&format!("{} WHERE id = $1", SELECT_TEAM))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "get team"))?;

        row.map(|row| row_to_team(&row)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Team>, DomainError> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_TEAM))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "list teams"))?;

        rows.iter().map(row_to_team).collect()
    }

    async fn save(&self, team: Team) -> Result<Team, DomainError> {
        match team.id() {
            None => {
                let id: i64 = sqlx::query_scalar(
                    "INSERT INTO team (city, team_name) VALUES ($1, $2) RETURNING id",
                )
                .bind(team.city())
                .bind(team.team_name())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| map_write_error(e, "create team"))?;

                Ok(team.with_id(EntityId::new(id)))
            }
            Some(id) => {
                let result = sqlx::query("UPDATE team SET city = $2, team_name = $3 WHERE id = $1")
                    .bind(id.value())
                    .bind(team.city())
                    .bind(team.team_name())
                    .execute(&self.pool)
                    .await
                    .map_err(|e| map_write_error(e, "update team"))?;

                if result.rows_affected() == 0 {
                    return Err(DomainError::not_found(format!("Team {} not found", id)));
                }

                Ok(team)
            }
        }
    }

    async fn delete_by_id(&self, id: EntityId) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM team WHERE id = $1")
            .bind(id.value())
            .execute(&self.pool)
            .await
            .map_err(|e| {
                let referenced = matches!(
                    &e,
                    sqlx::Error::Database(db_error) if db_error.is_foreign_key_violation()
                );

                if referenced {
                    DomainError::conflict(format!("Team {} is still referenced by a game", id))
                } else {
                    map_write_error(e, "delete team")
                }
            })?;

        Ok(result.rows_affected() > 0)
    }

    async fn get_team_by_team_name(&self, team_name: &str) -> Result<Option<Team>, DomainError> {
        self.fetch_one_where("team_name", team_name).await
    }

    async fn get_team_by_city(&self, city: &str) -> Result<Option<Team>, DomainError> {
        self.fetch_one_where("city", city).await
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM team")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_read_error(e, "count teams"))?;

        Ok(count as u64)
    }
}

fn row_to_team(row: &PgRow) -> Result<Team, DomainError> {
    let id: i64 = column(row, "id")?;
    let city: String = column(row, "city")?;
    let team_name: String = column(row, "team_name")?;

    team_from_columns(id, city, team_name)
}

/// Rebuild a team from its stored columns
pub(crate) fn team_from_columns(
    id: i64,
    city: String,
    team_name: String,
) -> Result<Team, DomainError> {
    Team::new(city, team_name)
        .map(|team| team.with_id(EntityId::new(id)))
        .map_err(|e| DomainError::storage(format!("Invalid team {} in database: {}", id, e)))
}

pub(crate) fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_from_columns() {
        let team = team_from_columns(4, "Atlanta".to_string(), "Falcons".to_string()).unwrap();

        assert_eq!(team.id(), Some(EntityId::new(4)));
        assert_eq!(team.full_team_name(), "Atlanta Falcons");
    }

    #[test]
    fn test_team_from_blank_columns_is_storage_error() {
        let err = team_from_columns(4, " ".to_string(), "Falcons".to_string()).unwrap_err();

        assert!(matches!(err, DomainError::Storage { .. }));
        assert!(err.to_string().contains("Invalid team 4"));
    }
}
