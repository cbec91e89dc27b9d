//! Category endpoints, storefront and admin.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::CategoryId;
use domain::{Category, CategoryStatus, CategoryUpdate};
use serde::{Deserialize, Serialize};

use super::{CreatedResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

// -- Request types --

#[derive(Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// Absent fields are left unchanged.
#[derive(Deserialize, Default)]
#[serde(default)]
pub struct UpdateCategoryRequest {
    pub name: Option<String>,
    pub parent_id: Option<CategoryId>,
    pub status: Option<CategoryStatus>,
}

impl From<UpdateCategoryRequest> for CategoryUpdate {
    fn from(req: UpdateCategoryRequest) -> Self {
        let mut update = CategoryUpdate::new();
        if let Some(name) = req.name {
            update = update.name(name);
        }
        if let Some(parent_id) = req.parent_id {
            update = update.parent(parent_id);
        }
        if let Some(status) = req.status {
            update = update.status(status);
        }
        update
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct CategoryResponse {
    pub id: CategoryId,
    pub name: String,
    pub parent_id: Option<CategoryId>,
    pub status: CategoryStatus,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id(),
            name: category.name().to_string(),
            parent_id: category.parent_id(),
            status: category.status(),
        }
    }
}

fn responses(categories: Vec<Category>) -> Vec<CategoryResponse> {
    categories.into_iter().map(CategoryResponse::from).collect()
}

// -- Storefront handlers --

/// GET /api/v1/categories: active categories.
#[tracing::instrument(skip(state))]
pub async fn list_public(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.categories.list_all_public().await?;
    Ok(Json(responses(categories)))
}

/// GET /api/v1/categories/:id: one active category.
#[tracing::instrument(skip(state))]
pub async fn get_public(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.categories.get_public(parse_id(&id)?).await?;
    Ok(Json(category.into()))
}

// -- Admin handlers --

/// POST /api/v1/admin/categories: create a category.
#[tracing::instrument(skip(state, req))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.categories.create(&req.name, req.parent_id).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.get() })))
}

/// GET /api/v1/admin/categories: every category, any status.
#[tracing::instrument(skip(state))]
pub async fn list_all(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<CategoryResponse>>, ApiError> {
    let categories = state.categories.list_all().await?;
    Ok(Json(responses(categories)))
}

/// GET /api/v1/admin/categories/:id
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state.categories.get(parse_id(&id)?).await?;
    Ok(Json(category.into()))
}

/// PATCH /api/v1/admin/categories/:id: partial update.
#[tracing::instrument(skip(state, req))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<UpdateCategoryRequest>,
) -> Result<Json<CategoryResponse>, ApiError> {
    let category = state
        .categories
        .update(parse_id(&id)?, req.into())
        .await?;
    Ok(Json(category.into()))
}

/// DELETE /api/v1/admin/categories/:id
#[tracing::instrument(skip(state))]
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state.categories.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}
