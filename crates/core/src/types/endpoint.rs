//! Connection endpoint (host, port)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{CoreError, DEFAULT_HOST, DEFAULT_PORT};

/// Server endpoint, fixed for the lifetime of one connection attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Endpoint {
    host: String,
    port: u16,
}

impl Endpoint {
    /// Create endpoint from host and port
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_PORT)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            // IPv6 literal
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}

impl FromStr for Endpoint {
    type Err = CoreError;

    /// Parse `host:port` or `[v6]:port`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (host, port) = s
            .rsplit_once(':')
            .ok_or_else(|| CoreError::InvalidEndpoint(format!("missing port in '{}'", s)))?;

        let host = host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(host);

        if host.is_empty() {
            return Err(CoreError::InvalidEndpoint(format!("missing host in '{}'", s)));
        }

        let port = port
            .parse::<u16>()
            .map_err(|e| CoreError::InvalidEndpoint(format!("bad port in '{}': {}", s, e)))?;

        Ok(Self::new(host, port))
    }
}
