//! HTTP handlers for the Store Back-Office Platform

pub mod health;
pub mod inventory;
pub mod purchase_order;

pub use health::*;
pub use inventory::*;
pub use purchase_order::*;
