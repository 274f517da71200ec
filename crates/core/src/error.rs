//! Error types for linechat-core

use thiserror::Error;

/// Core error type
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Line too long: {size} bytes without terminator (max: {max})")]
    LineTooLong { size: usize, max: usize },

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Not connected")]
    NotConnected,
}

/// Result type alias
pub type Result<T> = std::result::Result<T, CoreError>;
