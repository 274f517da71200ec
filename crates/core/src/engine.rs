//! Per-connection protocol engine
//!
//! Owns the framer and registry for one connection and publishes one event
//! per framed line, in arrival order.

use std::sync::Arc;

use crate::config::FramerConfig;
use crate::error::Result;
use crate::events::EventBus;
use crate::protocol::{CommandRegistry, LineFramer};
use crate::types::{ChatEvent, Endpoint};

pub struct ProtocolEngine {
    framer: LineFramer,
    registry: CommandRegistry,
    bus: Arc<EventBus>,
}

impl ProtocolEngine {
    /// Engine with the standard command set
    pub fn new(config: FramerConfig, bus: Arc<EventBus>) -> Self {
        Self::with_registry(config, CommandRegistry::standard(), bus)
    }

    /// Engine with a custom command table
    pub fn with_registry(
        config: FramerConfig,
        registry: CommandRegistry,
        bus: Arc<EventBus>,
    ) -> Self {
        Self {
            framer: LineFramer::new(config),
            registry,
            bus,
        }
    }

    /// Process a chunk of transport bytes
    ///
    /// Every complete line is dispatched and published before this returns.
    /// Returns the number of lines processed, or `LineTooLong` when a line
    /// exceeds the configured maximum. Lines before the oversized one are
    /// still published first; nothing after it is.
    pub fn feed(&mut self, chunk: &[u8]) -> Result<usize> {
        let mut processed = 0;
        for line in self.framer.feed(chunk) {
            let event = self.registry.dispatch(&line);
            self.bus.publish(&event);
            processed += 1;
        }

        self.framer.check_pending()?;
        Ok(processed)
    }

    /// Dispatch and publish a single already-framed line
    pub fn process_line(&self, line: &str) -> ChatEvent {
        let event = self.registry.dispatch(line);
        self.bus.publish(&event);
        event
    }

    /// Re-emit the transport's connect notification
    pub fn connection_established(&self, endpoint: &Endpoint) {
        tracing::info!("Connected to {}", endpoint);
        self.bus
            .publish(&ChatEvent::connection_established(endpoint.host(), endpoint.port()));
    }

    /// Re-emit the transport's disconnect notification
    pub fn connection_lost(&self) {
        tracing::info!("Connection lost");
        self.bus.publish(&ChatEvent::ConnectionLost);
    }

    /// Unterminated bytes still buffered
    pub fn pending_len(&self) -> usize {
        self.framer.pending_len()
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }
}

impl std::fmt::Debug for ProtocolEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProtocolEngine")
            .field("framer", &self.framer)
            .field("registry", &self.registry)
            .finish()
    }
}
