//! Error types for the Sterling client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using SterlingError
pub type Result<T> = std::result::Result<T, SterlingError>;

/// Unified error type for Sterling client operations
#[derive(Debug, Error)]
pub enum SterlingError {
    // -------------------------------------------------------------------------
    // Connection Errors
    // -------------------------------------------------------------------------
    /// Establishing the connection failed, or a send/receive failed against
    /// a severed connection. Never retried internally.
    #[error("connection error: {0}")]
    Connection(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Decode Errors
    // -------------------------------------------------------------------------
    /// The reply could not be parsed as the operation's return type.
    /// Raised only by `TTL`, whose reply must be a decimal integer.
    #[error("parse error: invalid integer reply {reply:?}")]
    Parse {
        /// The offending reply text
        reply: String,

        /// Underlying integer parse failure
        #[source]
        source: std::num::ParseIntError,
    },

    /// The reply violated the wire format (oversized line, invalid UTF-8).
    #[error("protocol error: {0}")]
    Protocol(String),
}
