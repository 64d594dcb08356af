//! Request extractors and the error envelope shared by every handler

pub mod error;
pub mod extract;
pub mod json;

pub use error::{ApiError, ApiErrorResponse};
pub use extract::{Path, Query};
pub use json::Json;
