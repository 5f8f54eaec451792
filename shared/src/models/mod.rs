//! Domain models for the Store Back-Office Platform

pub mod cart;
pub mod inventory;
pub mod material;
pub mod purchase_order;

pub use cart::*;
pub use inventory::*;
pub use material::*;
pub use purchase_order::*;
