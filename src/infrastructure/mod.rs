//! Infrastructure layer - Repository implementations, services and observability

pub mod game;
pub mod observability;
pub mod seed;
pub mod storage;
pub mod team;
