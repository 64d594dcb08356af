//! Domain layer - Core entities, validation rules and repository traits

pub mod entity;
pub mod error;
pub mod game;
pub mod paging;
pub mod team;

pub use entity::{EntityId, Identified};
pub use error::DomainError;
pub use game::{Game, GamePageRequest, GameRepository, GameSortField, GameValidationError};
pub use paging::{Page, PageRequest, PagingError, SortDirection};
pub use team::{Team, TeamRepository, TeamValidationError};
