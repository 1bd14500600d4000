//! # Sterling Client
//!
//! A synchronous client for the Sterling key-value store with:
//! - Typed operations over a newline-delimited text protocol
//! - One blocking TCP connection per client, one request in flight
//! - Buffered single-line reply framing
//! - Decoded-text or raw-bytes result representation
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Client                               │
//! │         (typed operations, connection lifecycle)            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                       Protocol                              │
//! │     (Command encoding / Response decoding / codec I/O)      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!              one blocking TcpStream
//!            (default localhost:9162)
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod protocol;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{Result, SterlingError};
pub use config::Config;
pub use client::Client;
pub use protocol::{Response, Value};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of the Sterling client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
