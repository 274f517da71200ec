//! Connection and framing configuration

use crate::types::Endpoint;
use crate::{DEFAULT_MAX_LINE_LENGTH, DEFAULT_READ_BUFFER_SIZE};

/// Line framer configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramerConfig {
    /// Maximum bytes in one line, terminator excluded (None = unbounded)
    pub max_line_length: Option<usize>,
}

impl Default for FramerConfig {
    fn default() -> Self {
        Self {
            max_line_length: Some(DEFAULT_MAX_LINE_LENGTH),
        }
    }
}

impl FramerConfig {
    /// No cap on buffered line size
    ///
    /// A peer that never sends a terminator grows the buffer without bound.
    pub fn unbounded() -> Self {
        Self {
            max_line_length: None,
        }
    }

    /// Cap buffered line size at `max` bytes
    pub fn with_max_line_length(max: usize) -> Self {
        Self {
            max_line_length: Some(max),
        }
    }
}

/// Client connection configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server to connect to
    pub endpoint: Endpoint,

    /// Size of each transport read (bytes)
    pub read_buffer_size: usize,

    /// Framing policy for inbound lines
    pub framer: FramerConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: Endpoint::default(),
            read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
            framer: FramerConfig::default(),
        }
    }
}

impl ClientConfig {
    /// Default settings for the given endpoint
    pub fn new(endpoint: Endpoint) -> Self {
        Self {
            endpoint,
            ..Self::default()
        }
    }

    /// Override the framing policy
    pub fn with_framer(mut self, framer: FramerConfig) -> Self {
        self.framer = framer;
        self
    }
}
