//! Protocol Module
//!
//! Defines the wire protocol for talking to a Sterling server.
//!
//! ## Wire Format (newline-delimited ASCII)
//!
//! ### Request Format
//! ```text
//! VERB arg0 [arg1 ...]\n
//! ```
//! Verb uppercase, arguments whitespace-separated, no escaping or quoting.
//!
//! ### Commands
//! - `SET key value`
//! - `GET key`
//! - `DEL key`
//! - `EXISTS key`
//! - `EXPIRE key seconds`
//! - `TTL key`
//! - `KEYS`
//!
//! ### Response Format
//! One line of text per request, interpreted after trimming surrounding
//! whitespace. Structured markers are limited to two sentinels:
//! - `(nil)`   - absent value (GET on a missing key)
//! - `(empty)` - empty key listing (KEYS on an empty store)
//!
//! All other semantics are literal matches (`OK`, `1`, `0`, decimal
//! integers) or server-defined error text with no error prefix convention.

mod command;
mod response;
mod codec;

pub use command::Command;
pub use response::{Response, Value, EMPTY_SENTINEL, NIL_SENTINEL};
pub use codec::{
    decode_response, encode_command, read_reply, write_command, write_line, MAX_REPLY_BYTES,
};
