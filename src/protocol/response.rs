//! Response definitions
//!
//! Represents decoded server replies and the output value representation.

use bytes::Bytes;

/// Wire text of the absent-value sentinel
pub const NIL_SENTINEL: &str = "(nil)";

/// Wire text of the empty-listing sentinel
pub const EMPTY_SENTINEL: &str = "(empty)";

/// A decoded single-line server reply
///
/// Sentinel strings are mapped to variants at the decode boundary so they
/// never propagate into caller code as magic strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    /// Literal `OK` acknowledgement
    Ok,

    /// `(nil)`: no value for the requested key
    Nil,

    /// `(empty)`: the store holds no keys
    Empty,

    /// Any other reply line (values, integers, server error text)
    Other(String),
}

impl Response {
    /// Whether this reply is the `OK` acknowledgement
    pub fn is_ok(&self) -> bool {
        matches!(self, Response::Ok)
    }

    /// The reply as its literal wire text
    pub fn into_text(self) -> String {
        match self {
            Response::Ok => "OK".to_string(),
            Response::Nil => NIL_SENTINEL.to_string(),
            Response::Empty => EMPTY_SENTINEL.to_string(),
            Response::Other(text) => text,
        }
    }
}

/// A textual result from the store
///
/// The representation is selected by the client's `decode_responses`
/// setting. Both forms carry the same bytes for any reply; only the type
/// differs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// Decoded character string (`decode_responses = true`, the default)
    Text(String),

    /// Raw byte sequence (`decode_responses = false`)
    Raw(Bytes),
}

impl Value {
    /// Wrap reply text in the representation selected by `decode_responses`
    pub(crate) fn from_reply(text: String, decode_responses: bool) -> Self {
        if decode_responses {
            Value::Text(text)
        } else {
            Value::Raw(Bytes::from(text.into_bytes()))
        }
    }

    /// View the value as raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Value::Text(text) => text.as_bytes(),
            Value::Raw(bytes) => bytes,
        }
    }

    /// View the value as UTF-8 text, if valid
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(text) => Some(text),
            Value::Raw(bytes) => std::str::from_utf8(bytes).ok(),
        }
    }

    /// Consume the value into a `String` (lossy for non-UTF-8 raw bytes)
    pub fn into_string(self) -> String {
        match self {
            Value::Text(text) => text,
            Value::Raw(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Text(text) => f.write_str(text),
            Value::Raw(bytes) => f.write_str(&String::from_utf8_lossy(bytes)),
        }
    }
}

impl PartialEq<&str> for Value {
    fn eq(&self, other: &&str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
