//! Order viewing routes. Orders arrive from the storefront checkout; the
//! admin console only reads them.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde::Serialize;

use prism_core::OrderId;

use crate::{
    db::OrderRepository, error::AppError, middleware::RequireAuth, models::OrderWithItems,
    state::AppState,
};

/// Build the orders router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/orders", get(list_orders))
        .route("/api/orders/{id}", get(get_order))
}

#[derive(Debug, Serialize)]
struct OrderListResponse {
    success: bool,
    orders: Vec<OrderWithItems>,
}

#[derive(Debug, Serialize)]
struct OrderResponse {
    success: bool,
    order: OrderWithItems,
}

/// GET /api/orders
async fn list_orders(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<OrderListResponse>, AppError> {
    let orders = OrderRepository::new(state.pool()).list_all().await?;

    Ok(Json(OrderListResponse {
        success: true,
        orders,
    }))
}

/// GET /api/orders/{id}
async fn get_order(
    RequireAuth(_): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<OrderResponse>, AppError> {
    let id = OrderId::new(id);

    let order = OrderRepository::new(state.pool())
        .get(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(Json(OrderResponse {
        success: true,
        order,
    }))
}
