//! Validation utilities for the Store Back-Office Platform
//!
//! Small, pure checks shared between the backend services and any future
//! client-side validation. All quantity arithmetic uses `rust_decimal`.

use rust_decimal::Decimal;

/// Validate an inbound quantity: additive, so zero is allowed but negative
/// values are not.
pub fn validate_inbound_quantity(quantity: Decimal) -> Result<(), &'static str> {
    if quantity < Decimal::ZERO {
        return Err("Inbound quantity must be zero or positive");
    }
    Ok(())
}

/// Validate an adjustment target: the new absolute stock level must be >= 0.
pub fn validate_adjusted_quantity(new_quantity: Decimal) -> Result<(), &'static str> {
    if new_quantity < Decimal::ZERO {
        return Err("Adjusted quantity must be zero or positive");
    }
    Ok(())
}

/// Validate an optimal-quantity target. Absent means "no target defined";
/// present values must be >= 0.
pub fn validate_optimal_quantity(optimal: Option<Decimal>) -> Result<(), &'static str> {
    match optimal {
        Some(v) if v < Decimal::ZERO => Err("Optimal quantity must be zero or positive"),
        _ => Ok(()),
    }
}

/// Validate a unit price override on an inbound request.
pub fn validate_unit_price(unit_price: Option<Decimal>) -> Result<(), &'static str> {
    match unit_price {
        Some(v) if v < Decimal::ZERO => Err("Unit price must be zero or positive"),
        _ => Ok(()),
    }
}

/// Validate an order line count at submission. Zero is allowed (the line is
/// excluded rather than refused, matching an untouched cart row); negative
/// counts are rejected.
pub fn validate_line_count(count: i32) -> Result<(), &'static str> {
    if count < 0 {
        return Err("Order line count cannot be negative");
    }
    Ok(())
}
