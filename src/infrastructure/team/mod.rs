//! Team persistence: in-memory and PostgreSQL repositories

mod postgres_repository;
mod repository;

pub use postgres_repository::PostgresTeamRepository;
pub(crate) use postgres_repository::{column, team_from_columns};
pub use repository::{InMemoryTeamRepository, TeamReferences};
