//! Error types for the state container.

use thiserror::Error;

/// Main error type for store operations.
///
/// Delivery never fails: a dead subscriber or an unwired chain is a silent
/// no-op, not an error. Errors are reserved for store misuse and parsing.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Dispatch already in progress")]
    DispatchInProgress,

    #[error("Unknown event kind: {0}")]
    UnknownEventKind(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
