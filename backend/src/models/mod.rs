//! Data models for the Store Back-Office Platform
//!
//! Domain models live in the shared crate so they can be reused by other
//! services; this module re-exports them for convenience.

pub use shared::models::*;
pub use shared::types::*;
