//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! VERB arg0 [arg1 ...]\n
//! ```
//!
//! ### Response
//! One line of text, interpreted after trimming surrounding whitespace.
//!
//! The stream helpers are generic over [`Write`] / [`BufRead`] so protocol
//! tests can run against in-memory buffers instead of a socket.

use std::io::{BufRead, Read, Write};

use crate::error::{Result, SterlingError};
use super::response::{EMPTY_SENTINEL, NIL_SENTINEL};
use super::{Command, Response};

/// Line terminator for requests and responses
pub const LINE_TERMINATOR: u8 = b'\n';

/// Maximum accepted reply line length (64 KiB)
///
/// A reply longer than this is a protocol violation rather than something
/// to buffer without bound.
pub const MAX_REPLY_BYTES: usize = 64 * 1024;

// =============================================================================
// Command Encoding
// =============================================================================

/// Render a command as its request line, without the terminator
pub fn encode_command(command: &Command) -> String {
    let verb = command.verb();
    match command {
        Command::Set { key, value } => format!("{} {} {}", verb, key, value),
        Command::Get { key }
        | Command::Del { key }
        | Command::Exists { key }
        | Command::Ttl { key } => format!("{} {}", verb, key),
        Command::Expire { key, seconds } => format!("{} {} {}", verb, key, seconds),
        Command::Keys => verb.to_string(),
    }
}

// =============================================================================
// Response Decoding
// =============================================================================

/// Decode one trimmed reply line into a tagged [`Response`]
pub fn decode_response(line: &str) -> Response {
    match line {
        "OK" => Response::Ok,
        NIL_SENTINEL => Response::Nil,
        EMPTY_SENTINEL => Response::Empty,
        other => Response::Other(other.to_string()),
    }
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Write one raw request line, appending the terminator and flushing
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(&[LINE_TERMINATOR])?;
    writer.flush()?;
    Ok(())
}

/// Write a command to a stream
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    write_line(writer, &encode_command(command))
}

/// Read exactly one reply line from a stream
///
/// Partial reads are accumulated until the terminator arrives, so a reply
/// split across TCP segments is reassembled instead of truncated. A reply
/// delimited by the server closing its write (EOF after partial data) is
/// returned as-is; EOF before any data is a connection error. The returned
/// text is trimmed of surrounding whitespace.
pub fn read_reply<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut line = Vec::new();
    let borrowed: &mut R = reader;
    let mut limited = Read::take(borrowed, (MAX_REPLY_BYTES + 1) as u64);
    let n = limited.read_until(LINE_TERMINATOR, &mut line)?;

    if n == 0 {
        return Err(SterlingError::Connection(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "connection closed by server",
        )));
    }

    if line.last() == Some(&LINE_TERMINATOR) {
        line.pop();
    }
    if line.len() > MAX_REPLY_BYTES {
        return Err(SterlingError::Protocol(format!(
            "reply line exceeds {} bytes",
            MAX_REPLY_BYTES
        )));
    }

    let text = String::from_utf8(line)
        .map_err(|e| SterlingError::Protocol(format!("reply is not valid UTF-8: {}", e)))?;

    Ok(text.trim().to_string())
}
