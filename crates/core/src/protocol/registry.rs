//! Command registry and dispatch
//!
//! Maps a line's head token to a handler. Adding a command kind means one
//! `register` call plus its handler; nothing else changes.

use std::collections::HashMap;
use std::fmt;

use super::handlers;
use super::tokenizer::{tokenize, Cursor};
use crate::types::ChatEvent;

/// Boxed command handler
pub type Handler = Box<dyn Fn(&mut Cursor<'_>) -> ChatEvent + Send + Sync>;

/// Command name to handler table
pub struct CommandRegistry {
    handlers: HashMap<&'static str, Handler>,
}

impl CommandRegistry {
    /// Registry with no commands: every line dispatches as chat
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Registry with the server's command set
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register("#error", handlers::error);
        registry.register("#alias", handlers::alias);
        registry.register("#connected", handlers::connected);
        registry.register("#disconnected", handlers::disconnected);
        registry.register("#renamed", handlers::renamed);
        registry.register("#list", handlers::list);
        registry.register("#private", handlers::private);
        registry
    }

    /// Bind `name` to `handler`, returning the handler it replaces
    pub fn register<F>(&mut self, name: &'static str, handler: F) -> Option<Handler>
    where
        F: Fn(&mut Cursor<'_>) -> ChatEvent + Send + Sync + 'static,
    {
        self.handlers.insert(name, Box::new(handler))
    }

    /// Exact, case-sensitive lookup
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered command names, sorted
    pub fn commands(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Classify one line and produce its event
    ///
    /// Known head: the handler parses the remainder. Unknown head: the whole
    /// line, head included, becomes a chat message.
    pub fn dispatch(&self, line: &str) -> ChatEvent {
        let (head, mut cursor) = tokenize(line);

        match self.handlers.get(head) {
            Some(handler) => {
                tracing::debug!(command = head, "Dispatching server command");
                handler(&mut cursor)
            }
            None => ChatEvent::chat_message(line),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.commands())
            .finish()
    }
}
