//! Game persistence and the service that builds games from requests

mod postgres_repository;
mod repository;
mod service;

pub use postgres_repository::PostgresGameRepository;
pub use repository::{InMemoryGameRepository, InMemoryGameStore};
pub use service::{GameCreationResult, GameRequest, GameService};
