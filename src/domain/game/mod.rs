//! Game domain
//!
//! The game entity with its home, visiting and optional favorite team, plus
//! the repository trait for weekly and paged lookups.

mod entity;
mod repository;
mod validation;

pub use entity::Game;
pub use repository::{ensure_teams_persisted, GamePageRequest, GameRepository, GameSortField};
pub use validation::{
    validate_line, validate_over_under, validate_week_number, GameValidationError,
};

#[cfg(test)]
pub use repository::MockGameRepository;
