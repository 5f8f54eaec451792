//! Purchase order models and status state machine

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a purchase order
///
/// `Pending -> Received -> Shipping -> Delivered`, with `Pending -> Canceled`
/// also reachable. Delivered and Canceled are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Received,
    Shipping,
    Delivered,
    Canceled,
}

impl OrderStatus {
    /// Whether the state machine permits moving from `self` to `target`.
    ///
    /// A same-state request is not a transition; callers treat it as an
    /// idempotent no-op rather than asking this function.
    pub fn can_transition_to(&self, target: OrderStatus) -> bool {
        matches!(
            (self, target),
            (OrderStatus::Pending, OrderStatus::Received)
                | (OrderStatus::Pending, OrderStatus::Canceled)
                | (OrderStatus::Received, OrderStatus::Shipping)
                | (OrderStatus::Shipping, OrderStatus::Delivered)
        )
    }

    /// Terminal states admit no outgoing transition.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Canceled)
    }

    /// Line and header edits are only allowed while pending.
    pub fn is_editable(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Received => "RECEIVED",
            OrderStatus::Shipping => "SHIPPING",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Canceled => "CANCELED",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(OrderStatus::Pending),
            "RECEIVED" => Ok(OrderStatus::Received),
            "SHIPPING" => Ok(OrderStatus::Shipping),
            "DELIVERED" => Ok(OrderStatus::Delivered),
            "CANCELED" => Ok(OrderStatus::Canceled),
            other => Err(format!("unknown order status: {other}")),
        }
    }
}

/// Order priority set by the operator at submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderPriority {
    #[default]
    Normal,
    Urgent,
}

impl OrderPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderPriority::Normal => "NORMAL",
            OrderPriority::Urgent => "URGENT",
        }
    }
}

impl std::str::FromStr for OrderPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(OrderPriority::Normal),
            "URGENT" => Ok(OrderPriority::Urgent),
            other => Err(format!("unknown order priority: {other}")),
        }
    }
}

/// Purchase order header
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub store_id: Uuid,
    /// Human-readable code, e.g. "ORD202608270042"
    pub order_code: String,
    /// Representative supplier label, display only
    pub supplier: String,
    /// First line's material name, shown in list views
    pub main_item_name: Option<String>,
    pub item_count: i32,
    pub priority: OrderPriority,
    pub notes: Option<String>,
    pub status: OrderStatus,
    pub order_date: NaiveDate,
    pub actual_delivery_date: Option<NaiveDate>,
    /// Always the sum of line totals
    pub total_price: Decimal,
    pub created_at: DateTime<Utc>,
}

/// Single line item of a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrderLine {
    pub id: Uuid,
    pub purchase_order_id: Uuid,
    pub store_material_id: Uuid,
    pub material_name: String,
    pub count: i32,
    pub unit_price: Decimal,
    pub total_price: Decimal,
}

/// Generate a human-readable order code: `ORD` + `yyyymmdd` + 4 digits.
///
/// The digits come from a v4 UUID, so collisions within a day are possible in
/// principle; the database's unique constraint on the code is the backstop.
pub fn generate_order_code(today: NaiveDate) -> String {
    let random = (Uuid::new_v4().as_u128() % 9000) + 1000;
    format!("ORD{}{}", today.format("%Y%m%d"), random)
}
