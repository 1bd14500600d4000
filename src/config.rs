//! Configuration for the Sterling client
//!
//! Centralized configuration with sensible defaults.

/// Default server host
pub const DEFAULT_HOST: &str = "localhost";

/// Default server TCP port
pub const DEFAULT_PORT: u16 = 9162;

/// Connection settings for a [`Client`](crate::Client)
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Endpoint Configuration
    // -------------------------------------------------------------------------
    /// Target host name or address
    pub host: String,

    /// Target TCP port
    pub port: u16,

    // -------------------------------------------------------------------------
    // Output Configuration
    // -------------------------------------------------------------------------
    /// When true (the default), textual results are returned as decoded
    /// strings; when false, as raw byte sequences. Selects the output
    /// representation only, never protocol behavior.
    pub decode_responses: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            decode_responses: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// The `host:port` form used for connecting and logging
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the target host name or address
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the target TCP port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Select decoded-text (true) or raw-bytes (false) results
    pub fn decode_responses(mut self, decode: bool) -> Self {
        self.config.decode_responses = decode;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
