//! Domain types for the chat protocol

mod endpoint;
mod event;

pub use endpoint::Endpoint;
pub use event::ChatEvent;
