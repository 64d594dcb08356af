//! Storage infrastructure - connection pool, schema migrations and backend selection

mod factory;
pub mod migrations;
mod postgres;

pub use factory::{Repositories, StorageFactory, StorageType};
pub use migrations::{pool_migrations, run_pool_migrations, Migration, Migrator, PostgresMigrator};
pub use postgres::PostgresConfig;
pub(crate) use postgres::{map_read_error, map_write_error};
