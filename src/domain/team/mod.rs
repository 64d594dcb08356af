//! Team domain
//!
//! Team entity, validation, and the repository trait used to look teams up
//! by name or city.

mod entity;
mod repository;
mod validation;

pub use entity::Team;
pub use repository::TeamRepository;
pub use validation::{validate_city, validate_team_name, TeamValidationError};

#[cfg(test)]
pub use repository::MockTeamRepository;
