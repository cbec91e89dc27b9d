//! Order endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use common::{MemberId, OrderId, ProductId};
use domain::{Order, OrderStatus, PlaceOrder};
use serde::Serialize;

use super::{CreatedResponse, parse_id};
use crate::AppState;
use crate::error::ApiError;
use crate::extract::{Caller, JsonBody};

// -- Response types --

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: OrderId,
    pub member_id: MemberId,
    pub product_id: ProductId,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: u32,
    pub total_price: i64,
    pub status: OrderStatus,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub shipping_zip_code: String,
    pub shipping_address: String,
    pub request_message: Option<String>,
    pub ordered_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub canceled_at: Option<DateTime<Utc>>,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        let shipping = order.shipping();
        Self {
            id: order.id(),
            member_id: order.member_id(),
            product_id: order.product_id(),
            product_name: order.product_name().to_string(),
            unit_price: order.unit_price().amount(),
            quantity: order.quantity(),
            total_price: order.total_price().amount(),
            status: order.status(),
            recipient_name: shipping.recipient_name().to_string(),
            recipient_phone: shipping.recipient_phone().to_string(),
            shipping_zip_code: shipping.zip_code().to_string(),
            shipping_address: shipping.address().to_string(),
            request_message: shipping.request_message().map(String::from),
            ordered_at: order.ordered_at(),
            updated_at: order.updated_at(),
            canceled_at: order.canceled_at(),
        }
    }
}

fn responses(orders: Vec<Order>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

// -- Handlers --

/// POST /api/v1/orders: place an order as the caller.
#[tracing::instrument(skip(state, cmd))]
pub async fn create(
    State(state): State<Arc<AppState>>,
    Caller(member_id): Caller,
    JsonBody(cmd): JsonBody<PlaceOrder>,
) -> Result<(StatusCode, Json<CreatedResponse>), ApiError> {
    let order_id = state.orders.create(member_id, cmd).await?;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse { id: order_id.get() }),
    ))
}

/// GET /api/v1/orders: the caller's orders, newest first.
#[tracing::instrument(skip(state))]
pub async fn list_mine(
    State(state): State<Arc<AppState>>,
    Caller(member_id): Caller,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orders.list_mine(member_id).await?;
    Ok(Json(responses(orders)))
}

/// GET /api/v1/orders/:id: one of the caller's orders.
#[tracing::instrument(skip(state))]
pub async fn get(
    State(state): State<Arc<AppState>>,
    Caller(member_id): Caller,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.get_detail(member_id, parse_id(&id)?).await?;
    Ok(Json(order.into()))
}

/// POST /api/v1/orders/:id/cancel: cancel and restore stock.
#[tracing::instrument(skip(state))]
pub async fn cancel(
    State(state): State<Arc<AppState>>,
    Caller(member_id): Caller,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, ApiError> {
    let order = state.orders.cancel(member_id, parse_id(&id)?).await?;
    Ok(Json(order.into()))
}

/// GET /api/v1/admin/orders: every order; caller must be an ADMIN.
#[tracing::instrument(skip(state))]
pub async fn list_all(
    State(state): State<Arc<AppState>>,
    Caller(member_id): Caller,
) -> Result<Json<Vec<OrderResponse>>, ApiError> {
    let orders = state.orders.list_all(member_id).await?;
    Ok(Json(responses(orders)))
}
