//! The error type shared by every bookstore context.

use thiserror::Error;
use uuid::Uuid;

/// Errors raised by domain logic and by the stores behind it.
///
/// `Validation` messages are written for the shopper and travel to the
/// client unchanged; the other variants are operator-facing.
#[derive(Debug, Error)]
pub enum DomainError {
    /// A referenced book or reservation does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The stream moved on since the aggregate was loaded.
    #[error("stream {aggregate_id} is at version {actual}, append expected {expected}")]
    ConcurrencyConflict {
        /// The stream that rejected the append.
        aggregate_id: Uuid,
        /// Version the writer loaded.
        expected: i64,
        /// Version the store holds.
        actual: i64,
    },

    /// The request breaks a business rule.
    #[error("{0}")]
    Validation(String),

    /// The store failed or returned unreadable data.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Shorthand for `DomainError::Validation`.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for `DomainError::NotFound`.
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }
}
