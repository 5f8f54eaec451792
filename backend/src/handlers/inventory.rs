//! HTTP handlers for the store inventory ledger endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::AppResult;
use crate::middleware::CurrentStore;
use crate::services::inventory::{
    InitInventoryResponse, InventoryListQuery, InventoryService, RecordAdjustmentInput,
    RecordInboundInput, SetOptimalQuantityInput,
};
use crate::AppState;
use shared::models::{AdjustmentEvent, InboundEvent, InventoryRow};

/// List the inventory ledger for the current store
pub async fn list_inventory(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Query(query): Query<InventoryListQuery>,
) -> AppResult<Json<Vec<InventoryRow>>> {
    let service = InventoryService::new(state.db);
    let rows = service.list(current_store.0.store_id, query).await?;
    Ok(Json(rows))
}

/// Initialize ledger rows for every catalog material the store is missing
pub async fn init_inventory(
    State(state): State<AppState>,
    current_store: CurrentStore,
) -> AppResult<Json<InitInventoryResponse>> {
    let service = InventoryService::new(state.db);
    let response = service.init_for_store(current_store.0.store_id).await?;
    Ok(Json(response))
}

/// Record an inbound (stock received) event
pub async fn record_inbound(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Json(input): Json<RecordInboundInput>,
) -> AppResult<Json<InboundEvent>> {
    let service = InventoryService::new(state.db);
    let event = service
        .record_inbound(current_store.0.store_id, input)
        .await?;
    Ok(Json(event))
}

/// Record an absolute stock adjustment
pub async fn record_adjustment(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Json(input): Json<RecordAdjustmentInput>,
) -> AppResult<Json<AdjustmentEvent>> {
    let service = InventoryService::new(state.db);
    let event = service
        .record_adjustment(current_store.0.store_id, input)
        .await?;
    Ok(Json(event))
}

/// Set or clear the optimal quantity of a ledger row
pub async fn set_optimal_quantity(
    State(state): State<AppState>,
    current_store: CurrentStore,
    Path(store_inventory_id): Path<Uuid>,
    Json(input): Json<SetOptimalQuantityInput>,
) -> AppResult<Json<InventoryRow>> {
    let service = InventoryService::new(state.db);
    let row = service
        .set_optimal_quantity(current_store.0.store_id, store_inventory_id, input)
        .await?;
    Ok(Json(row))
}
