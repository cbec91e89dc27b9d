//! Member endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::MemberId;
use domain::{Member, MemberRole, MemberStatus};
use serde::{Deserialize, Serialize};

use super::{CreatedResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;
use crate::extract::{Caller, JsonBody};

// -- Request types --

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub phone: String,
}

/// Absent fields are left unchanged.
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub phone: Option<String>,
}

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub status: MemberStatus,
}

#[derive(Deserialize)]
pub struct ChangeRoleRequest {
    pub role: MemberRole,
}

// -- Response types --

#[derive(Serialize)]
pub struct MemberResponse {
    pub id: MemberId,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub role: MemberRole,
    pub status: MemberStatus,
}

impl From<Member> for MemberResponse {
    fn from(member: Member) -> Self {
        Self {
            id: member.id(),
            email: member.email().to_string(),
            name: member.name().to_string(),
            phone: member.phone().to_string(),
            role: member.role(),
            status: member.status(),
        }
    }
}

// -- Handlers --

/// POST /api/v1/members: register a member.
#[tracing::instrument(skip(state, req))]
pub async fn register(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state
        .members
        .register(&req.email, &req.name, &req.phone)
        .await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.get() })))
}

/// GET /api/v1/members/me: the caller's own profile.
#[tracing::instrument(skip(state))]
pub async fn me(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state.members.get(caller.require()?).await?;
    Ok(Json(member.into()))
}

/// PATCH /api/v1/members/me: update the caller's name and/or phone.
#[tracing::instrument(skip(state, req))]
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    caller: Caller,
    JsonBody(req): JsonBody<UpdateProfileRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state
        .members
        .update_profile(caller.require()?, req.name.as_deref(), req.phone.as_deref())
        .await?;
    Ok(Json(member.into()))
}

/// DELETE /api/v1/members/me: withdraw. The member is kept as INACTIVE.
#[tracing::instrument(skip(state))]
pub async fn withdraw(
    State(state): State<Arc<AppState>>,
    caller: Caller,
) -> Result<StatusCode, ApiError> {
    state.members.deactivate(caller.require()?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/admin/members
#[tracing::instrument(skip(state))]
pub async fn list_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = state.members.list_all().await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// PATCH /api/v1/admin/members/:id/status
#[tracing::instrument(skip(state, req))]
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ChangeStatusRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state
        .members
        .change_status(parse_id(&id)?, req.status)
        .await?;
    Ok(Json(member.into()))
}

/// PATCH /api/v1/admin/members/:id/role
#[tracing::instrument(skip(state, req))]
pub async fn change_role(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ChangeRoleRequest>,
) -> Result<Json<MemberResponse>, ApiError> {
    let member = state
        .members
        .change_role(parse_id(&id)?, req.role)
        .await?;
    Ok(Json(member.into()))
}
