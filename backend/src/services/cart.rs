//! Order-cart aggregation service
//!
//! Turns a selection of ledger rows into proposed order lines. The cart is
//! ephemeral: nothing is persisted until the order is created.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::services::inventory::{InventoryListQuery, InventoryService};
use shared::models::{cart, CartLine};

/// Cart service building proposed order lines from ledger rows
#[derive(Clone)]
pub struct CartService {
    db: PgPool,
}

/// Input for building a cart
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCartInput {
    pub store_inventory_ids: Vec<Uuid>,
}

/// An aggregated cart ready for review
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    /// Single supplier name, "mixed" or "unspecified"
    pub supplier: String,
    pub total_price: Decimal,
}

impl CartService {
    /// Create a new CartService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Build a cart from the selected ledger rows
    ///
    /// Each line defaults its order quantity to the gap between the optimal
    /// and current quantity, floored at zero.
    pub async fn build_cart(
        &self,
        store_id: Uuid,
        input: BuildCartInput,
    ) -> AppResult<CartResponse> {
        if input.store_inventory_ids.is_empty() {
            return Err(AppError::EmptyCart);
        }

        let inventory = InventoryService::new(self.db.clone());
        let rows = inventory
            .list(store_id, InventoryListQuery::default())
            .await?;

        let mut lines = Vec::with_capacity(input.store_inventory_ids.len());
        for id in &input.store_inventory_ids {
            let row = rows
                .iter()
                .find(|row| row.store_inventory_id == *id)
                .ok_or_else(|| AppError::NotFound("Inventory row".to_string()))?;
            lines.push(CartLine::from_row(row));
        }

        let supplier = cart::infer_supplier(&lines);
        let total_price = cart::cart_total(&lines);

        Ok(CartResponse {
            lines,
            supplier,
            total_price,
        })
    }
}
