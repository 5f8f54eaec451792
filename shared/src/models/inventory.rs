//! Inventory ledger models and stock-status derivation

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derived stock level of an inventory row
///
/// Never stored as an authoritative column; recomputed from the raw quantity
/// and optimal-quantity fields on every read and after every mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Sufficient,
    Low,
    Shortage,
}

impl StockStatus {
    /// Derive the stock status from current and optimal quantity.
    ///
    /// Rules, evaluated in order:
    /// 1. missing or non-positive quantity -> Shortage
    /// 2. missing or non-positive optimal -> Sufficient (no target defined)
    /// 3. quantity below optimal -> Low
    /// 4. otherwise Sufficient
    pub fn from_levels(quantity: Option<Decimal>, optimal: Option<Decimal>) -> Self {
        let quantity = match quantity {
            Some(q) if q > Decimal::ZERO => q,
            _ => return StockStatus::Shortage,
        };
        match optimal {
            Some(o) if o > Decimal::ZERO => {
                if quantity < o {
                    StockStatus::Low
                } else {
                    StockStatus::Sufficient
                }
            }
            _ => StockStatus::Sufficient,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Sufficient => "sufficient",
            StockStatus::Low => "low",
            StockStatus::Shortage => "shortage",
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated per-store inventory row, one per (store, material) pair
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryRow {
    pub store_inventory_id: Uuid,
    pub store_id: Uuid,
    pub store_material_id: Uuid,
    pub material_name: String,
    /// Current stock in consumption units
    pub quantity: Decimal,
    /// Target stock; absent means no target is defined
    pub optimal_quantity: Option<Decimal>,
    pub base_unit: String,
    pub purchase_price: Option<Decimal>,
    pub supplier: Option<String>,
    pub hq_material: bool,
    pub nearest_expire_date: Option<NaiveDate>,
    pub last_updated: DateTime<Utc>,
    /// Computed at read time, never persisted
    pub status: StockStatus,
}

/// Reason attached to a stock adjustment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdjustmentReason {
    Manual,
    Damage,
    Loss,
    DataErrorCorrection,
    PhysicalAudit,
}

impl AdjustmentReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdjustmentReason::Manual => "manual",
            AdjustmentReason::Damage => "damage",
            AdjustmentReason::Loss => "loss",
            AdjustmentReason::DataErrorCorrection => "data_error_correction",
            AdjustmentReason::PhysicalAudit => "physical_audit",
        }
    }
}

impl std::str::FromStr for AdjustmentReason {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(AdjustmentReason::Manual),
            "damage" => Ok(AdjustmentReason::Damage),
            "loss" => Ok(AdjustmentReason::Loss),
            "data_error_correction" => Ok(AdjustmentReason::DataErrorCorrection),
            "physical_audit" => Ok(AdjustmentReason::PhysicalAudit),
            other => Err(format!("unknown adjustment reason: {other}")),
        }
    }
}

/// Write-once record of a single inbound action
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InboundEvent {
    pub id: Uuid,
    pub store_inventory_id: Uuid,
    /// Quantity added to current stock (additive, >= 0)
    pub quantity: Decimal,
    pub unit_price: Option<Decimal>,
    pub memo: Option<String>,
    /// Aggregated stock after this event was applied
    pub stock_after: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Write-once record of a single absolute stock adjustment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentEvent {
    pub id: Uuid,
    pub store_inventory_id: Uuid,
    pub quantity_before: Decimal,
    pub quantity_after: Decimal,
    pub difference: Decimal,
    pub reason: AdjustmentReason,
    pub memo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn test_zero_quantity_is_shortage() {
        assert_eq!(
            StockStatus::from_levels(Some(dec(0)), Some(dec(20))),
            StockStatus::Shortage
        );
        assert_eq!(
            StockStatus::from_levels(Some(dec(-1)), None),
            StockStatus::Shortage
        );
        assert_eq!(StockStatus::from_levels(None, None), StockStatus::Shortage);
    }

    #[test]
    fn test_no_target_means_sufficient() {
        assert_eq!(
            StockStatus::from_levels(Some(dec(1)), None),
            StockStatus::Sufficient
        );
        assert_eq!(
            StockStatus::from_levels(Some(dec(1)), Some(dec(0))),
            StockStatus::Sufficient
        );
        assert_eq!(
            StockStatus::from_levels(Some(dec(1)), Some(dec(-5))),
            StockStatus::Sufficient
        );
    }

    #[test]
    fn test_below_target_is_low() {
        assert_eq!(
            StockStatus::from_levels(Some(dec(5)), Some(dec(20))),
            StockStatus::Low
        );
    }

    #[test]
    fn test_at_or_above_target_is_sufficient() {
        assert_eq!(
            StockStatus::from_levels(Some(dec(20)), Some(dec(20))),
            StockStatus::Sufficient
        );
        assert_eq!(
            StockStatus::from_levels(Some(dec(25)), Some(dec(20))),
            StockStatus::Sufficient
        );
    }

    #[test]
    fn test_reason_round_trips_through_str() {
        for reason in [
            AdjustmentReason::Manual,
            AdjustmentReason::Damage,
            AdjustmentReason::Loss,
            AdjustmentReason::DataErrorCorrection,
            AdjustmentReason::PhysicalAudit,
        ] {
            assert_eq!(
                reason.as_str().parse::<AdjustmentReason>().unwrap(),
                reason
            );
        }
        assert!("unknown".parse::<AdjustmentReason>().is_err());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn level_strategy() -> impl Strategy<Value = Option<Decimal>> {
            proptest::option::of((-1000i64..=1000i64).prop_map(Decimal::from))
        }

        proptest! {
            /// Status derivation is pure and total: any input yields exactly
            /// one status, and the same input always yields the same status.
            #[test]
            fn prop_status_pure_and_total(
                quantity in level_strategy(),
                optimal in level_strategy()
            ) {
                let first = StockStatus::from_levels(quantity, optimal);
                let second = StockStatus::from_levels(quantity, optimal);
                prop_assert_eq!(first, second);
                prop_assert!(matches!(
                    first,
                    StockStatus::Sufficient | StockStatus::Low | StockStatus::Shortage
                ));
            }

            /// A positive quantity with no positive target is never Low.
            #[test]
            fn prop_no_target_never_low(quantity in 1i64..=1000i64) {
                let status = StockStatus::from_levels(Some(Decimal::from(quantity)), None);
                prop_assert_eq!(status, StockStatus::Sufficient);
            }
        }
    }
}
