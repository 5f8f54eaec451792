//! Business logic services for the Store Back-Office Platform

pub mod cart;
pub mod inventory;
pub mod purchase_order;

pub use cart::CartService;
pub use inventory::InventoryService;
pub use purchase_order::PurchaseOrderService;
