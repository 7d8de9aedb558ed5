//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant carries a human-readable message that is surfaced to callers
/// verbatim. Mapping to a transport status happens at the boundary, never here.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A required field was missing, a numeric field was negative, or a
    /// request was otherwise unusable (e.g. an empty cart).
    #[error("{0}")]
    InvalidArgument(String),

    /// A requested record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// A cart line asks for more units than are on hand.
    #[error("Insufficient stock for {item}")]
    InsufficientStock {
        item: String,
        requested: u64,
        available: u32,
    },
}

/// Discriminant of [`DomainError`], for boundary mapping tables.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    InsufficientStock,
}

impl DomainError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn insufficient_stock(item: impl Into<String>, requested: u64, available: u32) -> Self {
        Self::InsufficientStock {
            item: item.into(),
            requested,
            available,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            DomainError::NotFound(_) => ErrorKind::NotFound,
            DomainError::InsufficientStock { .. } => ErrorKind::InsufficientStock,
        }
    }
}
