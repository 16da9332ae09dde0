//! Error types for console flows

use thiserror::Error;

/// Failures surfaced to the operator by console flows.
///
/// Input problems are caught before anything is dispatched; the remaining
/// variants describe what came back from the wire. No retry or backoff is
/// attempted anywhere.
#[derive(Debug, Clone, Error)]
pub enum AdminError {
    /// A required field is empty or malformed; the operation was not
    /// attempted.
    #[error("{0}")]
    Input(String),

    /// The HTTP request itself failed (connect, TLS, body read).
    #[error("network error: {0}")]
    Network(String),

    /// The backend answered with a non-success status. Carries the response
    /// body's `message` field when present, else a generic description.
    #[error("{0}")]
    Backend(String),

    /// A success response whose body could not be decoded.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// Result type alias for console operations
pub type Result<T> = std::result::Result<T, AdminError>;
