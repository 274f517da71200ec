//! Line protocol: framing, tokenizing and command dispatch

pub mod framer;
pub mod handlers;
pub mod registry;
pub mod tokenizer;

pub use framer::{LineFramer, Lines};
pub use registry::{CommandRegistry, Handler};
pub use tokenizer::{tokenize, Cursor};
