//! Sterling client
//!
//! Owns one blocking TCP connection and translates typed operations into
//! request lines and decoded replies.

use std::io::{BufReader, BufWriter};
use std::net::TcpStream;

use crate::config::Config;
use crate::error::{Result, SterlingError};
use crate::protocol::{decode_response, read_reply, write_command, write_line};
use crate::protocol::{Command, Response, Value};

/// Buffered halves of the one TCP stream
struct Wire {
    /// TCP stream reader (buffered, also the single-line framing buffer)
    reader: BufReader<TcpStream>,

    /// TCP stream writer (buffered for efficiency)
    writer: BufWriter<TcpStream>,

    /// Peer address for logging
    peer_addr: String,
}

/// Synchronous client for a Sterling server
///
/// One client owns exactly one connection, with at most one request in
/// flight; replies are matched to requests purely by send/receive ordering.
/// Every operation takes `&mut self`, so the borrow checker already rules
/// out concurrent use of one client; sharing across threads requires
/// external serialization (one client per thread, or a mutex around it).
///
/// Dropping the client closes the connection on every exit path, including
/// unwinds; [`close`](Client::close) releases it early and is idempotent.
pub struct Client {
    /// Open connection, or `None` once closed
    wire: Option<Wire>,

    /// Output representation selector
    decode_responses: bool,
}

impl Client {
    /// Connect to the server named by `config`
    ///
    /// Fails with [`SterlingError::Connection`] if the endpoint refuses or
    /// is unreachable; the attempt is not retried.
    pub fn connect(config: Config) -> Result<Self> {
        let stream = TcpStream::connect((config.host.as_str(), config.port))?;

        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| config.addr());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        tracing::debug!("Connected to {}", peer_addr);

        Ok(Self {
            wire: Some(Wire {
                reader: BufReader::new(read_stream),
                writer: BufWriter::new(write_stream),
                peer_addr,
            }),
            decode_responses: config.decode_responses,
        })
    }

    // -------------------------------------------------------------------------
    // Raw command surface
    // -------------------------------------------------------------------------

    /// Send one raw command line and return the trimmed reply
    ///
    /// The line terminator is appended automatically; exactly one reply
    /// line is read back, in the representation selected by
    /// `decode_responses`. The command text is written unescaped.
    pub fn send_command(&mut self, command: &str) -> Result<Value> {
        let wire = self.wire_mut()?;
        tracing::trace!("{} <- {}", wire.peer_addr, command);

        write_line(&mut wire.writer, command)?;
        let reply = read_reply(&mut wire.reader)?;

        tracing::trace!("{} -> {}", wire.peer_addr, reply);
        Ok(self.output(reply))
    }

    // -------------------------------------------------------------------------
    // Typed operations
    // -------------------------------------------------------------------------

    /// Store `value` under `key`
    ///
    /// Returns true iff the server acknowledged with `OK`. Any other reply,
    /// including server error text, is reported as false rather than an
    /// error; use [`send_command`](Client::send_command) to inspect the
    /// server's text when the distinction matters.
    ///
    /// Keys and values travel unescaped, so they must not contain spaces
    /// or newlines.
    pub fn set(&mut self, key: &str, value: &str) -> Result<bool> {
        let response = self.request(&Command::Set {
            key: key.to_string(),
            value: value.to_string(),
        })?;
        Ok(response.is_ok())
    }

    /// Fetch the value stored under `key`
    ///
    /// Returns `None` when the server reports no value (`(nil)`), which is
    /// distinct from an empty string value.
    pub fn get(&mut self, key: &str) -> Result<Option<Value>> {
        match self.request(&Command::Get {
            key: key.to_string(),
        })? {
            Response::Nil => Ok(None),
            response => Ok(Some(self.output(response.into_text()))),
        }
    }

    /// Remove `key`
    ///
    /// Returns true iff the server acknowledged with `OK`; any other reply
    /// is false, never an error.
    pub fn delete(&mut self, key: &str) -> Result<bool> {
        let response = self.request(&Command::Del {
            key: key.to_string(),
        })?;
        Ok(response.is_ok())
    }

    /// Check whether `key` is present
    ///
    /// Returns true iff the server replies `1`; any other reply is false.
    pub fn exists(&mut self, key: &str) -> Result<bool> {
        let response = self.request(&Command::Exists {
            key: key.to_string(),
        })?;
        Ok(matches!(response, Response::Other(ref text) if text == "1"))
    }

    /// Set the time-to-live for `key`, in seconds
    ///
    /// Returns true iff the server acknowledged with `OK`; any other reply
    /// is false, never an error.
    pub fn expire(&mut self, key: &str, seconds: i64) -> Result<bool> {
        let response = self.request(&Command::Expire {
            key: key.to_string(),
            seconds,
        })?;
        Ok(response.is_ok())
    }

    /// Remaining time-to-live for `key`, in seconds
    ///
    /// Fails with [`SterlingError::Parse`] when the reply is not a decimal
    /// integer, e.g. when the server reports an error condition as text.
    pub fn ttl(&mut self, key: &str) -> Result<i64> {
        let reply = self
            .request(&Command::Ttl {
                key: key.to_string(),
            })?
            .into_text();
        reply
            .parse::<i64>()
            .map_err(|source| SterlingError::Parse { reply, source })
    }

    /// List every key in the store
    ///
    /// The reply is split on whitespace runs; `(empty)` maps to an empty
    /// vector. Order is preserved as sent by the server.
    pub fn keys(&mut self) -> Result<Vec<Value>> {
        match self.request(&Command::Keys)? {
            Response::Empty => Ok(Vec::new()),
            response => {
                let text = response.into_text();
                Ok(text
                    .split_whitespace()
                    .map(|key| self.output(key.to_string()))
                    .collect())
            }
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Release the connection
    ///
    /// Safe to call repeatedly; later operations fail with the
    /// connection-error kind.
    pub fn close(&mut self) {
        if let Some(wire) = self.wire.take() {
            tracing::debug!("Closing connection to {}", wire.peer_addr);
        }
    }

    /// Whether the client currently holds a connection
    pub fn is_connected(&self) -> bool {
        self.wire.is_some()
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    /// One request/reply exchange for a typed command
    fn request(&mut self, command: &Command) -> Result<Response> {
        let wire = self.wire_mut()?;
        tracing::trace!("{} <- {:?}", wire.peer_addr, command);

        write_command(&mut wire.writer, command)?;
        let reply = read_reply(&mut wire.reader)?;

        tracing::trace!("{} -> {}", wire.peer_addr, reply);
        Ok(decode_response(&reply))
    }

    fn wire_mut(&mut self) -> Result<&mut Wire> {
        self.wire.as_mut().ok_or_else(|| {
            SterlingError::Connection(std::io::Error::new(
                std::io::ErrorKind::NotConnected,
                "client is closed",
            ))
        })
    }

    fn output(&self, text: String) -> Value {
        Value::from_reply(text, self.decode_responses)
    }
}

impl Drop for Client {
    fn drop(&mut self) {
        self.close();
    }
}
