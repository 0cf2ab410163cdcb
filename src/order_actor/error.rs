//! Error types for the Order actor.

use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The requested order was not found.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// A status value outside `preparing`, `ready`, `completed`.
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    /// A confirmation role other than `waiter` or `customer`.
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    /// The order data provided is invalid.
    #[error("Order validation error: {0}")]
    Validation(String),

    /// The order store could not be reached or did not answer.
    #[error("Order store unavailable: {0}")]
    Persistence(String),
}
