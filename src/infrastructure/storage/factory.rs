//! Storage factory for runtime backend selection

use std::sync::Arc;

use sqlx::PgPool;
use tracing::info;

use crate::config::StorageSettings;
use crate::domain::{DomainError, GameRepository, TeamRepository};
use crate::infrastructure::game::{InMemoryGameRepository, InMemoryGameStore, PostgresGameRepository};
use crate::infrastructure::team::{InMemoryTeamRepository, PostgresTeamRepository};

use super::migrations::run_pool_migrations;
use super::postgres::PostgresConfig;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl StorageType {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Some(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Some(Self::Postgres),
            _ => None,
        }
    }
}

/// The repositories backing one running application
#[derive(Clone)]
pub struct Repositories {
    pub teams: Arc<dyn TeamRepository>,
    pub games: Arc<dyn GameRepository>,
    /// Present for the PostgreSQL backend
    pub pool: Option<PgPool>,
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repositories")
            .field("pool", &self.pool.is_some())
            .finish_non_exhaustive()
    }
}

impl Repositories {
    /// Fresh, empty in-memory repositories
    pub fn in_memory() -> Self {
        let store = Arc::new(InMemoryGameStore::new());
        let teams: Arc<dyn TeamRepository> =
            Arc::new(InMemoryTeamRepository::new().with_references(store.clone()));
        let games: Arc<dyn GameRepository> =
            Arc::new(InMemoryGameRepository::with_store(teams.clone(), store));

        Self {
            teams,
            games,
            pool: None,
        }
    }

    /// Repositories sharing one PostgreSQL pool
    pub fn postgres(pool: PgPool) -> Self {
        Self {
            teams: Arc::new(PostgresTeamRepository::new(pool.clone())),
            games: Arc::new(PostgresGameRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }
}

/// Factory for creating repositories from configuration
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Build the configured backend, applying migrations when enabled
    pub async fn create(settings: &StorageSettings) -> Result<Repositories, DomainError> {
        let storage_type = StorageType::from_str(&settings.backend).ok_or_else(|| {
            DomainError::configuration(format!(
                "Unknown storage backend '{}'",
                settings.backend
            ))
        })?;

        match storage_type {
            StorageType::InMemory => {
                info!("Using in-memory storage");
                Ok(Repositories::in_memory())
            }
            StorageType::Postgres => {
                let pool = Self::connect(settings).await?;

                if settings.run_migrations {
                    let applied = run_pool_migrations(&pool).await?;
                    info!(applied, "Database migrations complete");
                }

                Ok(Repositories::postgres(pool))
            }
        }
    }

    /// Open a PostgreSQL pool from the storage settings
    pub async fn connect(settings: &StorageSettings) -> Result<PgPool, DomainError> {
        let config = PostgresConfig::from_settings(settings)?;
        info!(
            max_connections = config.max_connections,
            "Connecting to PostgreSQL"
        );
        config.connect().await
    }
}
