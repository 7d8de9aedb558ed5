//! `smartgrocer-core`: shared domain building blocks.
//!
//! This crate contains **pure domain** primitives (no transport or runtime concerns).

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult, ErrorKind};
pub use id::ItemId;
