//! Configuration for datsearch
//!
//! Centralized configuration with sensible defaults.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{Result, SearchError};
use crate::protocol::{ByteOrder, Codec, SearchMode, DEFAULT_MAX_FIELD_SIZE};

/// Main configuration for a search client
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Network Configuration
    // -------------------------------------------------------------------------
    /// Where the search server listens
    pub endpoint: Endpoint,

    /// Read deadline per stream read (milliseconds, 0 = none)
    pub read_timeout_ms: u64,

    /// Write deadline per request write (milliseconds, 0 = none)
    pub write_timeout_ms: u64,

    // -------------------------------------------------------------------------
    // Protocol Configuration
    // -------------------------------------------------------------------------
    /// Byte order of every integer on the wire; must match the server
    pub byte_order: ByteOrder,

    /// Mode used by `Client::query`
    pub search_mode: SearchMode,

    /// Largest accepted data or needle field (in bytes)
    pub max_field_size: usize,
}

/// Server address
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// `host:port`
    Tcp(String),

    /// Filesystem path of a Unix domain socket
    Unix(PathBuf),
}

impl Endpoint {
    /// Build an endpoint from a network name (`tcp` or `unix`) and address
    pub fn parse(network: &str, address: &str) -> Result<Self> {
        match network.trim().to_ascii_lowercase().as_str() {
            "tcp" | "tcp4" | "tcp6" => Ok(Endpoint::Tcp(address.to_string())),
            "unix" => Ok(Endpoint::Unix(PathBuf::from(address))),
            other => Err(SearchError::Config(format!(
                "Unknown network: {:?} (expected tcp or unix)",
                other
            ))),
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Tcp(addr) => write!(f, "tcp://{}", addr),
            Endpoint::Unix(path) => write!(f, "unix://{}", path.display()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::Tcp("127.0.0.1:80".to_string()),
            read_timeout_ms: 0,
            write_timeout_ms: 0,
            byte_order: ByteOrder::Little,
            search_mode: SearchMode::ALL,
            max_field_size: DEFAULT_MAX_FIELD_SIZE,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Codec matching this configuration
    pub fn codec(&self) -> Codec {
        Codec::new(self.byte_order).with_max_field_size(self.max_field_size)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    (ms > 0).then(|| Duration::from_millis(ms))
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Connect over TCP to `host:port`
    pub fn tcp(mut self, addr: impl Into<String>) -> Self {
        self.config.endpoint = Endpoint::Tcp(addr.into());
        self
    }

    /// Connect to a Unix domain socket at `path`
    pub fn unix(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.endpoint = Endpoint::Unix(path.into());
        self
    }

    pub fn endpoint(mut self, endpoint: Endpoint) -> Self {
        self.config.endpoint = endpoint;
        self
    }

    /// Set the read timeout (in milliseconds, 0 disables it)
    pub fn read_timeout_ms(mut self, ms: u64) -> Self {
        self.config.read_timeout_ms = ms;
        self
    }

    /// Set the write timeout (in milliseconds, 0 disables it)
    pub fn write_timeout_ms(mut self, ms: u64) -> Self {
        self.config.write_timeout_ms = ms;
        self
    }

    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.config.byte_order = order;
        self
    }

    pub fn search_mode(mut self, mode: SearchMode) -> Self {
        self.config.search_mode = mode;
        self
    }

    /// Set the largest accepted field (in bytes)
    pub fn max_field_size(mut self, size: usize) -> Self {
        self.config.max_field_size = size;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
