//! Inventory domain module.
//!
//! This crate owns the item collection and every rule for mutating it,
//! implemented as plain synchronous logic (no IO, no HTTP).

pub mod item;
pub mod seed;
pub mod store;

pub use item::{Item, ItemPatch, NewItem};
pub use store::{
    InventoryStats, InventoryStore, StockReport, StockRequest, Withdrawal, LOW_STOCK_THRESHOLD,
};
