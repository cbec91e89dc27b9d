//! Product endpoints, storefront and admin.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::{CategoryId, ProductId};
use domain::{CreateProduct, Product, ProductStatus, UpdateProduct};
use serde::{Deserialize, Serialize};

use super::{CreatedResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;
use crate::extract::JsonBody;

// -- Request types --

#[derive(Deserialize)]
pub struct ChangeStatusRequest {
    pub status: ProductStatus,
}

// -- Response types --

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub name: String,
    pub price: i64,
    pub stock: i64,
    pub description: Option<String>,
    pub status: ProductStatus,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id(),
            category_id: product.category_id(),
            name: product.name().to_string(),
            price: product.price().amount(),
            stock: product.stock(),
            description: product.description().map(String::from),
            status: product.status(),
        }
    }
}

fn responses(products: Vec<Product>) -> Vec<ProductResponse> {
    products.into_iter().map(ProductResponse::from).collect()
}

// -- Storefront handlers --

/// GET /api/v1/categories/:id/products: visible products of an active category.
#[tracing::instrument(skip(state))]
pub async fn list_public(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state
        .products
        .list_public_by_category(parse_id(&category_id)?)
        .await?;
    Ok(Json(responses(products)))
}

/// GET /api/v1/products/:id: hidden and discontinued products are 404.
#[tracing::instrument(skip(state))]
pub async fn get_public(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get_public(parse_id(&id)?).await?;
    Ok(Json(product.into()))
}

// -- Admin handlers --

/// POST /api/v1/admin/products: create a product.
#[tracing::instrument(skip(state, cmd))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    JsonBody(cmd): JsonBody<CreateProduct>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let id = state.products.create(cmd).await?;
    Ok((StatusCode::CREATED, Json(CreatedResponse { id: id.get() })))
}

/// GET /api/v1/admin/categories/:id/products: every product of a category.
#[tracing::instrument(skip(state))]
pub async fn list_all(
    State(state): State<Arc<AppState>>,
    Path(category_id): Path<String>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state
        .products
        .list_by_category(parse_id(&category_id)?)
        .await?;
    Ok(Json(responses(products)))
}

/// GET /api/v1/admin/products/:id
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get(parse_id(&id)?).await?;
    Ok(Json(product.into()))
}

/// PATCH /api/v1/admin/products/:id: partial update.
#[tracing::instrument(skip(state, update))]
pub async fn update(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(update): JsonBody<UpdateProduct>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.update(parse_id(&id)?, update).await?;
    Ok(Json(product.into()))
}

/// PATCH /api/v1/admin/products/:id/status: explicit status change.
#[tracing::instrument(skip(state, req))]
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(req): JsonBody<ChangeStatusRequest>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .change_status(parse_id(&id)?, req.status)
        .await?;
    Ok(Json(product.into()))
}
