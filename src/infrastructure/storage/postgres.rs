//! PostgreSQL connection pooling and shared error mapping

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};

use crate::config::StorageSettings;
use crate::domain::DomainError;

/// PostgreSQL pool configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/football_pool".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Build from the storage section; the URL must resolve
    pub fn from_settings(settings: &StorageSettings) -> Result<Self, DomainError> {
        let url = settings.resolve_database_url().ok_or_else(|| {
            DomainError::configuration(
                "storage.database_url or the DATABASE_URL environment variable is required",
            )
        })?;

        Ok(Self {
            url,
            max_connections: settings.max_connections,
            min_connections: settings.min_connections,
            connect_timeout_secs: settings.connect_timeout_secs,
            idle_timeout_secs: settings.idle_timeout_secs,
        })
    }

    /// Open a connection pool
    pub async fn connect(&self) -> Result<PgPool, DomainError> {
        PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(Duration::from_secs(self.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(self.idle_timeout_secs))
            .connect(&self.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))
    }
}

/// Map a failed INSERT/UPDATE to a domain error.
///
/// Constraint violations are caller mistakes and keep their own variants; the
/// rest is reported as a storage fault.
pub(crate) fn map_write_error(error: sqlx::Error, action: &str) -> DomainError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.is_unique_violation() {
            return DomainError::conflict(format!("Failed to {}: duplicate value", action));
        }

        if db_error.is_foreign_key_violation() {
            return DomainError::validation(format!(
                "Failed to {}: referenced team does not exist",
                action
            ));
        }

        if db_error.is_check_violation() {
            return DomainError::validation(format!(
                "Failed to {}: {}",
                action,
                db_error.message()
            ));
        }
    }

    DomainError::storage(format!("Failed to {}: {}", action, error))
}

pub(crate) fn map_read_error(error: sqlx::Error, action: &str) -> DomainError {
    DomainError::storage(format!("Failed to {}: {}", action, error))
}
