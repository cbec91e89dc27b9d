//! HTTP route handlers.

pub mod categories;
pub mod health;
pub mod members;
pub mod metrics;
pub mod orders;
pub mod products;

use std::num::NonZeroU64;

use serde::Serialize;

use crate::error::ApiError;

/// Body of a `201 Created` response.
#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: u64,
}

/// Parses a positive integer path segment into an id newtype.
fn parse_id<T: From<NonZeroU64>>(raw: &str) -> Result<T, ApiError> {
    raw.parse::<NonZeroU64>()
        .map(T::from)
        .map_err(|_| ApiError::BadRequest(format!("Invalid ID format: {raw}")))
}
