//! Shared types and models for the Store Back-Office Platform
//!
//! This crate contains the domain types shared between the backend and other
//! components of the system: inventory rows and stock-status derivation, the
//! order cart aggregation logic, and the purchase-order state machine.

pub mod models;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;
pub use validation::*;
