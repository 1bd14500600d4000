//! Command definitions
//!
//! Represents requests to the server.

/// A single protocol request
///
/// Keys and values are carried verbatim; the protocol has no escaping, so
/// they must not contain the argument delimiter (space) or a newline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Store a value under a key
    Set { key: String, value: String },

    /// Fetch the value stored under a key
    Get { key: String },

    /// Remove a key
    Del { key: String },

    /// Check whether a key is present
    Exists { key: String },

    /// Set a key's time-to-live in seconds
    Expire { key: String, seconds: i64 },

    /// Fetch a key's remaining time-to-live in seconds
    Ttl { key: String },

    /// List every key in the store
    Keys,
}

impl Command {
    /// Get the wire verb for this command
    pub fn verb(&self) -> &'static str {
        match self {
            Command::Set { .. } => "SET",
            Command::Get { .. } => "GET",
            Command::Del { .. } => "DEL",
            Command::Exists { .. } => "EXISTS",
            Command::Expire { .. } => "EXPIRE",
            Command::Ttl { .. } => "TTL",
            Command::Keys => "KEYS",
        }
    }
}
