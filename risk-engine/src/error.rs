//! Error types for the risk engine

use thiserror::Error;

/// Result type for risk engine operations
pub type Result<T> = std::result::Result<T, Error>;

/// Risk engine errors
#[derive(Debug, Error)]
pub enum Error {
    /// Seller key unknown to the seller store
    #[error("Seller not found: {0}")]
    SellerNotFound(String),

    /// Violation id unknown to the violation store
    #[error("Violation not found: {0}")]
    ViolationNotFound(String),

    /// Malformed input record (unrecognized enum value, bad rating, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Backing store unreachable; retry policy belongs to the caller
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Concurrency error (batch task panicked or was aborted)
    #[error("Concurrency error: {0}")]
    Concurrency(String),
}
