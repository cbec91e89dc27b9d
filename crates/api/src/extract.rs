//! Request extractors.

use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Request};
use axum::http::request::Parts;
use common::MemberId;
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// Header carrying the caller's member id.
pub const MEMBER_ID_HEADER: &str = "x-member-id";

/// The caller's identity, if the request carried one.
///
/// A missing header yields `Caller(None)` and leaves the decision to the
/// domain; a header that is not a positive integer is rejected.
#[derive(Debug, Clone, Copy)]
pub struct Caller(pub Option<MemberId>);

impl Caller {
    /// The caller's id, or `Unauthorized` for an anonymous request.
    pub fn require(self) -> Result<MemberId, ApiError> {
        self.0.ok_or(ApiError::Unauthorized)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(MEMBER_ID_HEADER) else {
            return Ok(Caller(None));
        };
        let member_id = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .and_then(MemberId::new)
            .ok_or_else(|| ApiError::BadRequest(format!("Invalid {MEMBER_ID_HEADER} header")))?;
        Ok(Caller(Some(member_id)))
    }
}

/// JSON request body whose rejections use the API error shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(JsonBody(value))
    }
}
