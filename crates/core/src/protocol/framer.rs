//! Newline framing over a streaming transport
//!
//! Bytes arrive in arbitrary chunks. The framer keeps them in a single
//! buffer and hands out complete `\n`-terminated lines, terminator stripped.
//! A trailing partial line stays buffered until its terminator arrives.
//!
//! With a maximum line length configured, a line longer than the maximum is
//! rejected whether it arrived in one chunk or many: it is never yielded,
//! not even in part. Its bytes are dropped up to and including the next
//! terminator, and framing resumes after it.

use bytes::BytesMut;

use crate::config::FramerConfig;
use crate::error::{CoreError, Result};

const TERMINATOR: u8 = b'\n';

/// Accumulates transport bytes and extracts complete lines
#[derive(Debug, Default)]
pub struct LineFramer {
    buf: BytesMut,
    /// Prefix of `buf` already known to contain no terminator
    scanned: usize,
    /// Dropping the remainder of an oversized line
    discarding: bool,
    /// Size of an oversized line not yet reported by `check_pending`
    overflow: Option<usize>,
    config: FramerConfig,
}

impl LineFramer {
    /// Create framer with the given policy
    pub fn new(config: FramerConfig) -> Self {
        Self {
            buf: BytesMut::new(),
            scanned: 0,
            discarding: false,
            overflow: None,
            config,
        }
    }

    /// Append a chunk and iterate over the lines now complete
    ///
    /// The iterator is lazy: each `next()` removes one line from the buffer.
    /// Lines not pulled before the iterator is dropped stay buffered and
    /// come out of the next `feed` call, so nothing is lost.
    ///
    /// The iterator stops at the first oversized line. Nothing more is
    /// yielded until `check_pending` has reported it.
    pub fn feed(&mut self, chunk: &[u8]) -> Lines<'_> {
        self.buf.extend_from_slice(chunk);
        Lines { framer: self }
    }

    /// Bytes buffered after the last terminator
    pub fn pending_len(&self) -> usize {
        match self.buf.iter().rposition(|b| *b == TERMINATOR) {
            Some(idx) => self.buf.len() - idx - 1,
            None => self.buf.len(),
        }
    }

    /// Report a line that exceeded the maximum
    ///
    /// Call after draining the iterator returned by `feed`. `size` in the
    /// error is the number of bytes seen when the line was rejected, which
    /// for a line split across chunks may be less than its full length.
    pub fn check_pending(&mut self) -> Result<()> {
        let Some(max) = self.config.max_line_length else {
            return Ok(());
        };

        if self.overflow.is_none() && !self.discarding && !self.buf.contains(&TERMINATOR) {
            self.reject_tail(max);
        }

        match self.overflow.take() {
            Some(size) => Err(CoreError::LineTooLong { size, max }),
            None => Ok(()),
        }
    }

    /// Framing policy in use
    pub fn config(&self) -> FramerConfig {
        self.config
    }

    /// Drop an unterminated buffer that already exceeds `max`
    fn reject_tail(&mut self, max: usize) {
        if self.buf.len() > max {
            self.overflow = Some(self.buf.len());
            self.buf.clear();
            self.scanned = 0;
            self.discarding = true;
        }
    }

    /// Drop bytes through the terminator that ends an oversized line
    ///
    /// Returns false while the terminator has not arrived yet.
    fn skip_discarded(&mut self) -> bool {
        match self.buf.iter().position(|b| *b == TERMINATOR) {
            Some(idx) => {
                let _ = self.buf.split_to(idx + 1);
                self.discarding = false;
                true
            }
            None => {
                self.buf.clear();
                false
            }
        }
    }
}

/// Lazy iterator over complete lines in the framer buffer
#[derive(Debug)]
pub struct Lines<'a> {
    framer: &'a mut LineFramer,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let framer = &mut *self.framer;
        if framer.overflow.is_some() {
            return None;
        }
        if framer.discarding && !framer.skip_discarded() {
            return None;
        }

        let start = framer.scanned;
        let Some(offset) = framer.buf[start..].iter().position(|b| *b == TERMINATOR) else {
            framer.scanned = framer.buf.len();
            if let Some(max) = framer.config.max_line_length {
                framer.reject_tail(max);
            }
            return None;
        };

        let end = start + offset;
        let mut line = framer.buf.split_to(end + 1);
        framer.scanned = 0;

        if framer.config.max_line_length.is_some_and(|max| end > max) {
            framer.overflow = Some(end);
            return None;
        }

        line.truncate(end);
        Some(String::from_utf8_lossy(&line).into_owned())
    }
}
