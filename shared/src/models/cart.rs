//! Order cart aggregation
//!
//! The cart is ephemeral, session-scoped state: a view over selected
//! inventory rows with an operator-editable order quantity. Nothing here is
//! persisted; submission hands the qualifying lines to the purchase-order
//! manager and the cart is discarded.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::InventoryRow;

/// Supplier label shown for a multi-line cart when suppliers differ
pub const SUPPLIER_MIXED: &str = "mixed";
/// Supplier label shown when no line carries a supplier
pub const SUPPLIER_UNSPECIFIED: &str = "unspecified";

/// One editable line of the order cart
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub store_inventory_id: Uuid,
    pub store_material_id: Uuid,
    pub material_name: String,
    pub base_unit: String,
    pub current_quantity: Decimal,
    pub optimal_quantity: Option<Decimal>,
    pub supplier: Option<String>,
    pub unit_price: Decimal,
    pub order_quantity: Decimal,
    pub total_price: Decimal,
}

impl CartLine {
    /// Build a cart line from an inventory row with the proposed defaults:
    /// quantity to order is the gap to the optimal level (floored at zero),
    /// unit price is the last known purchase price (zero if absent).
    pub fn from_row(row: &InventoryRow) -> Self {
        let unit_price = row.purchase_price.unwrap_or(Decimal::ZERO);
        let order_quantity = default_order_quantity(row.quantity, row.optimal_quantity);
        Self {
            store_inventory_id: row.store_inventory_id,
            store_material_id: row.store_material_id,
            material_name: row.material_name.clone(),
            base_unit: row.base_unit.clone(),
            current_quantity: row.quantity,
            optimal_quantity: row.optimal_quantity,
            supplier: row.supplier.clone(),
            unit_price,
            order_quantity,
            total_price: order_quantity * unit_price,
        }
    }

    /// Apply an operator edit to the order quantity. Negative quantities are
    /// rejected; zero is allowed but the line is excluded at submission.
    pub fn set_order_quantity(&mut self, quantity: Decimal) -> Result<(), &'static str> {
        if quantity < Decimal::ZERO {
            return Err("Order quantity cannot be negative");
        }
        self.order_quantity = quantity;
        self.total_price = quantity * self.unit_price;
        Ok(())
    }
}

/// Proposed order quantity for a row: `max(optimal - current, 0)`
pub fn default_order_quantity(current: Decimal, optimal: Option<Decimal>) -> Decimal {
    let gap = optimal.unwrap_or(Decimal::ZERO) - current;
    gap.max(Decimal::ZERO)
}

/// Lines that qualify for submission (positive order quantity)
pub fn qualifying_lines(lines: &[CartLine]) -> Vec<&CartLine> {
    lines
        .iter()
        .filter(|l| l.order_quantity > Decimal::ZERO)
        .collect()
}

/// Sum of line totals for the cart footer
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(|l| l.total_price).sum()
}

/// Infer a representative supplier label for display.
///
/// A single shared non-empty supplier yields that name; differing suppliers
/// yield "mixed"; no suppliers at all yield "unspecified". The label is
/// informational only and is never enforced server-side.
pub fn infer_supplier(lines: &[CartLine]) -> String {
    let mut suppliers = lines
        .iter()
        .filter_map(|l| l.supplier.as_deref())
        .filter(|s| !s.is_empty());

    let Some(first) = suppliers.next() else {
        return SUPPLIER_UNSPECIFIED.to_string();
    };

    let named = lines
        .iter()
        .filter_map(|l| l.supplier.as_deref())
        .filter(|s| !s.is_empty())
        .count();

    if named == lines.len() && suppliers.all(|s| s == first) {
        first.to_string()
    } else {
        SUPPLIER_MIXED.to_string()
    }
}
