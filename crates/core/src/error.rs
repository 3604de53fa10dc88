//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant maps to exactly one business rule, so callers can match on
/// the rule that fired rather than parsing messages. A failing operation
/// leaves state unchanged; there is no retry layer inside the domain.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A uniqueness predicate failed at construction (username, SKU,
    /// department name, employee-per-user, customer-per-user).
    #[error("{0} already exists")]
    DuplicateEntity(&'static str),

    /// Product discount outside the `[0, 100]` percent range.
    #[error("discount must be between 0 and 100, got {0}")]
    InvalidDiscount(f64),

    /// Requested quantity or deduction exceeds available stock.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: f64, available: f64 },

    /// Negative quantity on an order item.
    #[error("quantity must not be negative, got {0}")]
    InvalidQuantity(f64),

    /// Missing or mismatched verification code.
    #[error("verification failed")]
    VerificationFailed,

    /// Order address does not belong to the order's customer.
    #[error("address does not belong to the customer")]
    InvalidAddress,

    /// Status change attempted on an order with no items.
    #[error("order has no items")]
    NoItems,

    /// Status value outside the recognized enum range.
    #[error("unknown status: {0}")]
    UnknownStatus(String),

    /// Status change disallowed because the order is already paid.
    #[error("order is already paid; only completion, cancellation or return is allowed")]
    OrderLocked,

    /// Rating value `<= 0` assigned to an employee.
    #[error("rating value must be positive, got {0}")]
    InvalidRating(f64),

    /// Rating attempted before payment or delivery completion.
    #[error("order must be paid or delivered before rating the employee")]
    RatingNotAllowed,

    /// Average rating requested for an employee with no rating history.
    #[error("employee has no ratings yet")]
    NoRatingsYet,

    /// Computed take-home salary `<= 0`.
    #[error("take-home salary is not positive")]
    TerminatedForNegativeEarnings,

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn duplicate(kind: &'static str) -> Self {
        Self::DuplicateEntity(kind)
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn unknown_status(value: impl Into<String>) -> Self {
        Self::UnknownStatus(value.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}
