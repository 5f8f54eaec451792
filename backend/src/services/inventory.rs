//! Inventory ledger service
//!
//! Owns the per-store inventory rows and their auditable event streams.
//! Stock is only ever changed inside a transaction that locks the target
//! row, so concurrent inbounds and adjustments serialize per row and the
//! aggregated quantity always matches the event history.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use crate::error::{AppError, AppResult};
use shared::models::{AdjustmentEvent, AdjustmentReason, InboundEvent, InventoryRow, StockStatus};
use shared::validation;

/// Inventory service for the per-store stock ledger
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Query parameters for listing the ledger
#[derive(Debug, Default, Deserialize)]
pub struct InventoryListQuery {
    /// Filter by derived status: "sufficient", "low" or "shortage"
    pub status: Option<String>,
    /// Case-insensitive material name search
    pub search: Option<String>,
}

/// Input for recording an inbound event
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordInboundInput {
    pub store_inventory_id: Uuid,
    /// Optional cross-check against the row's catalog reference
    pub store_material_id: Option<Uuid>,
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub expire_date: Option<NaiveDate>,
    #[validate(length(max = 500))]
    pub memo: Option<String>,
}

/// Input for recording an absolute adjustment
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordAdjustmentInput {
    pub store_inventory_id: Uuid,
    /// New absolute quantity, not a delta
    pub new_quantity: Decimal,
    pub reason: Option<AdjustmentReason>,
    #[validate(length(max = 500))]
    pub memo: Option<String>,
}

/// Input for setting or clearing the optimal quantity
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetOptimalQuantityInput {
    pub optimal_quantity: Option<Decimal>,
}

/// Response for ledger initialization
#[derive(Debug, Serialize)]
pub struct InitInventoryResponse {
    /// Number of rows created; rows that already existed are untouched
    pub created: u64,
}

/// Row shape of the ledger join, before status derivation
#[derive(Debug, FromRow)]
struct LedgerRow {
    store_inventory_id: Uuid,
    store_id: Uuid,
    store_material_id: Uuid,
    material_name: String,
    quantity: Decimal,
    optimal_quantity: Option<Decimal>,
    base_unit: String,
    purchase_price: Option<Decimal>,
    supplier: Option<String>,
    hq_material: bool,
    nearest_expire_date: Option<NaiveDate>,
    last_updated: DateTime<Utc>,
}

impl LedgerRow {
    fn into_model(self) -> InventoryRow {
        let status = StockStatus::from_levels(Some(self.quantity), self.optimal_quantity);
        InventoryRow {
            store_inventory_id: self.store_inventory_id,
            store_id: self.store_id,
            store_material_id: self.store_material_id,
            material_name: self.material_name,
            quantity: self.quantity,
            optimal_quantity: self.optimal_quantity,
            base_unit: self.base_unit,
            purchase_price: self.purchase_price,
            supplier: self.supplier,
            hq_material: self.hq_material,
            nearest_expire_date: self.nearest_expire_date,
            last_updated: self.last_updated,
            status,
        }
    }
}

/// Row shape of a locked ledger row inside a mutation transaction
#[derive(Debug, FromRow)]
struct LockedRow {
    store_inventory_id: Uuid,
    store_material_id: Uuid,
    quantity: Decimal,
    purchase_price: Option<Decimal>,
}

/// Row shape of an inbound event insert
#[derive(Debug, FromRow)]
struct InboundEventRow {
    id: Uuid,
    store_inventory_id: Uuid,
    quantity: Decimal,
    unit_price: Option<Decimal>,
    memo: Option<String>,
    stock_after: Decimal,
    created_at: DateTime<Utc>,
}

/// Row shape of an adjustment event insert
#[derive(Debug, FromRow)]
struct AdjustmentEventRow {
    id: Uuid,
    store_inventory_id: Uuid,
    quantity_before: Decimal,
    quantity_after: Decimal,
    difference: Decimal,
    reason: String,
    memo: Option<String>,
    created_at: DateTime<Utc>,
}

impl AdjustmentEventRow {
    fn into_model(self) -> AppResult<AdjustmentEvent> {
        let reason = self
            .reason
            .parse::<AdjustmentReason>()
            .map_err(|e| AppError::Internal(anyhow::anyhow!(e)))?;
        Ok(AdjustmentEvent {
            id: self.id,
            store_inventory_id: self.store_inventory_id,
            quantity_before: self.quantity_before,
            quantity_after: self.quantity_after,
            difference: self.difference,
            reason,
            memo: self.memo,
            created_at: self.created_at,
        })
    }
}

const LEDGER_SELECT: &str = r#"
    SELECT si.id AS store_inventory_id, si.store_id, si.store_material_id,
           sm.name AS material_name, si.quantity, si.optimal_quantity,
           sm.base_unit, sm.purchase_price, sm.supplier, sm.hq_material,
           si.nearest_expire_date, si.last_updated
    FROM store_inventory si
    JOIN store_materials sm ON sm.id = si.store_material_id
"#;

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// List ledger rows for a store, with derived status
    pub async fn list(
        &self,
        store_id: Uuid,
        query: InventoryListQuery,
    ) -> AppResult<Vec<InventoryRow>> {
        let search = query
            .search
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("%{}%", s.trim()));

        let sql = format!(
            "{LEDGER_SELECT} WHERE si.store_id = $1 AND ($2::text IS NULL OR sm.name ILIKE $2) \
             ORDER BY sm.name ASC"
        );
        let rows = sqlx::query_as::<_, LedgerRow>(&sql)
            .bind(store_id)
            .bind(search)
            .fetch_all(&self.db)
            .await?;

        // Status is derived, so the status filter applies after the fetch
        let status_filter = match query.status.as_deref().filter(|s| !s.is_empty()) {
            Some("sufficient") => Some(StockStatus::Sufficient),
            Some("low") => Some(StockStatus::Low),
            Some("shortage") => Some(StockStatus::Shortage),
            Some(other) => {
                return Err(AppError::Validation {
                    field: "status".to_string(),
                    message: format!("Unknown status filter: {}", other),
                })
            }
            None => None,
        };

        let rows = rows
            .into_iter()
            .map(LedgerRow::into_model)
            .filter(|row| status_filter.map_or(true, |s| row.status == s))
            .collect();

        Ok(rows)
    }

    /// Create missing ledger rows for every material in the store catalog
    ///
    /// Idempotent: rows that already exist are left untouched, so repeated
    /// calls never reset quantities.
    pub async fn init_for_store(&self, store_id: Uuid) -> AppResult<InitInventoryResponse> {
        let result = sqlx::query(
            r#"
            INSERT INTO store_inventory (id, store_id, store_material_id, quantity, last_updated)
            SELECT gen_random_uuid(), $1, sm.id, 0, NOW()
            FROM store_materials sm
            WHERE sm.store_id = $1
            ON CONFLICT (store_id, store_material_id) DO NOTHING
            "#,
        )
        .bind(store_id)
        .execute(&self.db)
        .await?;

        Ok(InitInventoryResponse {
            created: result.rows_affected(),
        })
    }

    /// Record an inbound event and add its quantity to current stock
    ///
    /// The unit price is resolved in order: request price, catalog purchase
    /// price, price of the most recent inbound for the same row.
    pub async fn record_inbound(
        &self,
        store_id: Uuid,
        input: RecordInboundInput,
    ) -> AppResult<InboundEvent> {
        input.validate()?;
        validation::validate_inbound_quantity(input.quantity).map_err(|message| {
            AppError::InvalidQuantity {
                field: "quantity".to_string(),
                message: message.to_string(),
            }
        })?;
        validation::validate_unit_price(input.unit_price).map_err(|message| {
            AppError::Validation {
                field: "unit_price".to_string(),
                message: message.to_string(),
            }
        })?;

        let mut tx = self.db.begin().await?;

        let row = lock_row(&mut tx, store_id, input.store_inventory_id).await?;

        if let Some(material_id) = input.store_material_id {
            if material_id != row.store_material_id {
                return Err(AppError::UnresolvedReference(format!(
                    "Material {} does not match the target inventory row",
                    material_id
                )));
            }
        }

        let unit_price = match input.unit_price.or(row.purchase_price) {
            Some(price) => Some(price),
            None => last_inbound_price(&mut tx, row.store_inventory_id).await?,
        };

        let stock_after = row.quantity + input.quantity;

        sqlx::query(
            r#"
            UPDATE store_inventory
            SET quantity = $2,
                nearest_expire_date = LEAST(COALESCE(nearest_expire_date, $3::date), COALESCE($3::date, nearest_expire_date)),
                last_updated = NOW()
            WHERE id = $1
            "#,
        )
        .bind(row.store_inventory_id)
        .bind(stock_after)
        .bind(input.expire_date)
        .execute(&mut *tx)
        .await?;

        let event = sqlx::query_as::<_, InboundEventRow>(
            r#"
            INSERT INTO inventory_inbound_events (
                id, store_inventory_id, quantity, unit_price, memo, stock_after
            )
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5)
            RETURNING id, store_inventory_id, quantity, unit_price, memo, stock_after, created_at
            "#,
        )
        .bind(row.store_inventory_id)
        .bind(input.quantity)
        .bind(unit_price)
        .bind(&input.memo)
        .bind(stock_after)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            store_inventory_id = %event.store_inventory_id,
            quantity = %event.quantity,
            stock_after = %event.stock_after,
            "Recorded inbound event"
        );

        Ok(InboundEvent {
            id: event.id,
            store_inventory_id: event.store_inventory_id,
            quantity: event.quantity,
            unit_price: event.unit_price,
            memo: event.memo,
            stock_after: event.stock_after,
            created_at: event.created_at,
        })
    }

    /// Record an absolute adjustment, replacing current stock
    pub async fn record_adjustment(
        &self,
        store_id: Uuid,
        input: RecordAdjustmentInput,
    ) -> AppResult<AdjustmentEvent> {
        input.validate()?;
        let reason = input.reason.ok_or(AppError::MissingReason)?;

        validation::validate_adjusted_quantity(input.new_quantity).map_err(|message| {
            AppError::InvalidQuantity {
                field: "new_quantity".to_string(),
                message: message.to_string(),
            }
        })?;

        let mut tx = self.db.begin().await?;

        let row = lock_row(&mut tx, store_id, input.store_inventory_id).await?;

        let quantity_before = row.quantity;
        let quantity_after = input.new_quantity;
        let difference = quantity_after - quantity_before;

        sqlx::query("UPDATE store_inventory SET quantity = $2, last_updated = NOW() WHERE id = $1")
            .bind(row.store_inventory_id)
            .bind(quantity_after)
            .execute(&mut *tx)
            .await?;

        let event = sqlx::query_as::<_, AdjustmentEventRow>(
            r#"
            INSERT INTO inventory_adjustment_events (
                id, store_inventory_id, quantity_before, quantity_after, difference, reason, memo
            )
            VALUES (gen_random_uuid(), $1, $2, $3, $4, $5, $6)
            RETURNING id, store_inventory_id, quantity_before, quantity_after, difference,
                      reason, memo, created_at
            "#,
        )
        .bind(row.store_inventory_id)
        .bind(quantity_before)
        .bind(quantity_after)
        .bind(difference)
        .bind(reason.as_str())
        .bind(&input.memo)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            store_inventory_id = %event.store_inventory_id,
            difference = %event.difference,
            reason = reason.as_str(),
            "Recorded stock adjustment"
        );

        event.into_model()
    }

    /// Set or clear the optimal quantity of a ledger row
    pub async fn set_optimal_quantity(
        &self,
        store_id: Uuid,
        store_inventory_id: Uuid,
        input: SetOptimalQuantityInput,
    ) -> AppResult<InventoryRow> {
        validation::validate_optimal_quantity(input.optimal_quantity).map_err(|message| {
            AppError::InvalidQuantity {
                field: "optimal_quantity".to_string(),
                message: message.to_string(),
            }
        })?;

        let mut tx = self.db.begin().await?;

        let row = lock_row(&mut tx, store_id, store_inventory_id).await?;

        sqlx::query(
            "UPDATE store_inventory SET optimal_quantity = $2, last_updated = NOW() WHERE id = $1",
        )
        .bind(row.store_inventory_id)
        .bind(input.optimal_quantity)
        .execute(&mut *tx)
        .await?;

        let sql = format!("{LEDGER_SELECT} WHERE si.id = $1");
        let updated = sqlx::query_as::<_, LedgerRow>(&sql)
            .bind(row.store_inventory_id)
            .fetch_one(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(updated.into_model())
    }
}

/// Lock a ledger row for update, verifying store ownership
async fn lock_row(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_id: Uuid,
    store_inventory_id: Uuid,
) -> AppResult<LockedRow> {
    sqlx::query_as::<_, LockedRow>(
        r#"
        SELECT si.id AS store_inventory_id, si.store_material_id, si.quantity, sm.purchase_price
        FROM store_inventory si
        JOIN store_materials sm ON sm.id = si.store_material_id
        WHERE si.id = $1 AND si.store_id = $2
        FOR UPDATE OF si
        "#,
    )
    .bind(store_inventory_id)
    .bind(store_id)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| AppError::NotFound("Inventory row".to_string()))
}

/// Price of the most recent inbound event for a ledger row, if any
async fn last_inbound_price(
    tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    store_inventory_id: Uuid,
) -> AppResult<Option<Decimal>> {
    let price = sqlx::query_scalar::<_, Option<Decimal>>(
        r#"
        SELECT unit_price
        FROM inventory_inbound_events
        WHERE store_inventory_id = $1 AND unit_price IS NOT NULL
        ORDER BY created_at DESC
        LIMIT 1
        "#,
    )
    .bind(store_inventory_id)
    .fetch_optional(&mut **tx)
    .await?;

    Ok(price.flatten())
}
