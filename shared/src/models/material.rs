//! Store material (catalog) models
//!
//! Materials are the read-only reference data the inventory ledger and the
//! purchase-order manager resolve against. The engine never writes them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A catalog item carried by a store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreMaterial {
    pub id: Uuid,
    pub store_id: Uuid,
    pub name: String,
    /// Consumption unit label (e.g., "g", "ea", "ml")
    pub base_unit: String,
    /// Last known price per purchase unit
    pub purchase_price: Option<Decimal>,
    pub supplier: Option<String>,
    /// Whether the item is centrally supplied by headquarters
    pub hq_material: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_material_serializes_camel_case() {
        let m = StoreMaterial {
            id: Uuid::new_v4(),
            store_id: Uuid::new_v4(),
            name: "milk".to_string(),
            base_unit: "ml".to_string(),
            purchase_price: Some(Decimal::from(4)),
            supplier: None,
            hq_material: true,
        };
        let json = serde_json::to_value(&m).unwrap();
        assert!(json.get("baseUnit").is_some());
        assert!(json.get("hqMaterial").is_some());
    }
}
