//! Inbound stream pump
//!
//! Drains a byte stream into the protocol engine. Dispatch and publishing
//! happen inline on the pumping task, so events keep framing order and
//! nothing is queued between the transport and subscribers.

use tokio::io::{AsyncRead, AsyncReadExt};

use crate::engine::ProtocolEngine;
use crate::Result;

/// Pump transport bytes into `engine` until the stream ends
///
/// # Behavior
/// 1. Read up to `read_buffer_size` bytes at a time
/// 2. Feed each chunk to the engine (lines are published inline)
/// 3. Stop on EOF, I/O error, or buffered-line overflow
/// 4. Publish `ConnectionLost` exactly once on the way out
///
/// # Returns
/// * `Ok(())` - Peer closed the stream
/// * `Err(CoreError::Io)` - Read failed
/// * `Err(CoreError::LineTooLong)` - Peer exceeded the line size cap
pub async fn pump_lines<R>(
    mut reader: R,
    mut engine: ProtocolEngine,
    read_buffer_size: usize,
) -> Result<()>
where
    R: AsyncRead + Unpin + Send,
{
    let mut buf = vec![0u8; read_buffer_size.max(1)];

    let result = loop {
        let n = match reader.read(&mut buf).await {
            Ok(0) => {
                tracing::debug!("Transport EOF, closing line pump");
                break Ok(());
            }
            Ok(n) => n,
            Err(e) => {
                tracing::warn!("Transport read failed: {}", e);
                break Err(e.into());
            }
        };

        tracing::trace!("Read {} bytes from transport", n);

        if let Err(e) = engine.feed(&buf[..n]) {
            tracing::warn!("Dropping connection: {}", e);
            break Err(e);
        }
    };

    let pending = engine.pending_len();
    if pending > 0 {
        tracing::debug!("Discarding {} unterminated bytes", pending);
    }

    engine.connection_lost();
    result
}
