//! HTTP handlers for cart aggregation and the purchase-order lifecycle

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentStore;
use crate::services::cart::{BuildCartInput, CartResponse, CartService};
use crate::services::purchase_order::{
    CreateOrderInput, OrderListQuery, PurchaseOrderDetail, PurchaseOrderService,
    UpdateOrderInput, UpdateStatusInput,
};
use crate::AppState;
use shared::models::PurchaseOrder;
use shared::types::PaginatedResponse;

/// Aggregate selected ledger rows into an order cart
pub async fn build_cart(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Json(input): Json<BuildCartInput>,
) -> AppResult<Json<CartResponse>> {
    let service = CartService::new(state.db);
    let cart = service.build_cart(current_store.0.store_id, input).await?;
    Ok(Json(cart))
}

/// Create a purchase order from submitted cart lines
pub async fn create_purchase_order(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Json(input): Json<CreateOrderInput>,
) -> AppResult<Json<PurchaseOrderDetail>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service.create(current_store.0.store_id, input).await?;
    Ok(Json(order))
}

/// List purchase orders with filters and pagination
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<PaginatedResponse<PurchaseOrder>>> {
    let service = PurchaseOrderService::new(state.db);
    let orders = service.list(current_store.0.store_id, query).await?;
    Ok(Json(orders))
}

/// Get a purchase order with its lines
pub async fn get_purchase_order(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrderDetail>> {
    let service = PurchaseOrderService::new(state.db);
    let detail = service.get_detail(current_store.0.store_id, order_id).await?;
    Ok(Json(detail))
}

/// Replace the lines and metadata of a pending order
pub async fn update_purchase_order(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Path(order_id): Path<Uuid>,
    Json(input): Json<UpdateOrderInput>,
) -> AppResult<Json<PurchaseOrderDetail>> {
    let service = PurchaseOrderService::new(state.db);
    let detail = service
        .update(current_store.0.store_id, order_id, input)
        .await?;
    Ok(Json(detail))
}

/// Delete a purchase order and its lines
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Path(order_id): Path<Uuid>,
) -> AppResult<Json<()>> {
    let service = PurchaseOrderService::new(state.db);
    service.delete(current_store.0.store_id, order_id).await?;
    Ok(Json(()))
}

/// Advance (or cancel) an order through its lifecycle
///
/// The target status is a query parameter: `?status=RECEIVED`.
pub async fn update_order_status(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Path(order_id): Path<Uuid>,
    Query(input): Query<UpdateStatusInput>,
) -> AppResult<Json<PurchaseOrder>> {
    let service = PurchaseOrderService::new(state.db);
    let order = service
        .update_status(current_store.0.store_id, order_id, input)
        .await?;
    Ok(Json(order))
}

/// Delete a single line from a pending order
pub async fn delete_order_line(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Path(line_id): Path<Uuid>,
) -> AppResult<Json<PurchaseOrderDetail>> {
    let service = PurchaseOrderService::new(state.db);
    let detail = service
        .delete_line(current_store.0.store_id, line_id)
        .await?;
    Ok(Json(detail))
}
