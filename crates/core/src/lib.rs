//! Linechat Core - Line-based chat protocol engine
//!
//! This crate provides:
//! - Line framing over a streaming transport
//! - Command tokenizing and table-driven dispatch
//! - Typed chat events and an observer-list event bus
//! - Outbound line writer and TCP transport binding
//! - Error types

// Defaults for a client connection
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 3101;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 8192;
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

pub mod config;
pub mod engine;
pub mod error;
pub mod events;
pub mod protocol;
pub mod transport;
pub mod types;

// Re-export common types
pub use config::{ClientConfig, FramerConfig};
pub use engine::ProtocolEngine;
pub use error::{CoreError, Result};
pub use events::{EventBus, SubscriptionId};
pub use protocol::{tokenize, CommandRegistry, Cursor, LineFramer};
pub use transport::{ChatClient, LineWriter};
pub use types::{ChatEvent, Endpoint};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_defined() {
        assert_eq!(DEFAULT_PORT, 3101);
        assert_eq!(DEFAULT_READ_BUFFER_SIZE, 8192);
        assert!(DEFAULT_MAX_LINE_LENGTH >= DEFAULT_READ_BUFFER_SIZE);
    }
}
