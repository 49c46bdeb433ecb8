//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a deterministic business failure: recoverable, reported
/// to the caller, and raised **before** any state mutation happens.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or non-positive input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A domain invariant was violated (contract misuse by the caller).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// No catalog product carries the given id.
    #[error("no product with id '{0}'")]
    UnknownProduct(String),

    /// No cart line exists at the given 1-based position.
    #[error("no cart item at position {0}")]
    UnknownLine(u32),

    /// The product has zero units available.
    #[error("'{0}' is out of stock")]
    OutOfStock(String),

    /// The requested quantity exceeds the units currently available.
    #[error("only {available} of '{name}' available")]
    InsufficientStock { name: String, available: u32 },

    /// The cart holds no items to update or check out.
    #[error("cart is empty")]
    EmptyCart,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn unknown_product(id: impl Into<String>) -> Self {
        Self::UnknownProduct(id.into())
    }

    pub fn unknown_line(line_no: u32) -> Self {
        Self::UnknownLine(line_no)
    }

    pub fn out_of_stock(name: impl Into<String>) -> Self {
        Self::OutOfStock(name.into())
    }

    pub fn insufficient_stock(name: impl Into<String>, available: u32) -> Self {
        Self::InsufficientStock {
            name: name.into(),
            available,
        }
    }
}
