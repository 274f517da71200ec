//! Outbound line writer
//!
//! Every `send` writes `text + '\n'` while holding one async mutex, so two
//! concurrent sends never interleave their bytes on the wire.

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::Result;

/// Serializes outbound lines onto a byte sink
#[derive(Debug)]
pub struct LineWriter<W> {
    sink: Mutex<W>,
}

impl<W> LineWriter<W>
where
    W: AsyncWrite + Unpin + Send,
{
    pub fn new(sink: W) -> Self {
        Self {
            sink: Mutex::new(sink),
        }
    }

    /// Write one line, appending the terminator
    ///
    /// `text` is not validated: an embedded `\n` reaches the peer as two
    /// lines. It is logged, not rejected.
    pub async fn send(&self, text: &str) -> Result<()> {
        if text.contains('\n') {
            tracing::warn!("Outbound text contains an embedded line terminator");
        }

        let mut frame = Vec::with_capacity(text.len() + 1);
        frame.extend_from_slice(text.as_bytes());
        frame.push(b'\n');

        let mut sink = self.sink.lock().await;
        sink.write_all(&frame).await?;
        sink.flush().await?;

        tracing::trace!("Sent {} bytes", frame.len());
        Ok(())
    }

    /// Close the write side of the transport
    pub async fn shutdown(&self) -> Result<()> {
        self.sink.lock().await.shutdown().await?;
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.sink.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_send_appends_terminator_once() {
        let writer = LineWriter::new(Vec::new());
        writer.send("ping").await.unwrap();
        assert_eq!(writer.into_inner(), b"ping\n");
    }

    #[tokio::test]
    async fn test_send_empty_text() {
        let writer = LineWriter::new(Vec::new());
        writer.send("").await.unwrap();
        assert_eq!(writer.into_inner(), b"\n");
    }

    #[tokio::test]
    async fn test_send_utf8() {
        let writer = LineWriter::new(Vec::new());
        writer.send("ça va ?").await.unwrap();
        assert_eq!(writer.into_inner(), "ça va ?\n".as_bytes());
    }

    #[tokio::test]
    async fn test_concurrent_sends_do_not_interleave() {
        let writer = Arc::new(LineWriter::new(Vec::new()));

        let mut tasks = Vec::new();
        for i in 0..32 {
            let writer = writer.clone();
            tasks.push(tokio::spawn(async move {
                let text = format!("{}", i).repeat(200);
                writer.send(&text).await.unwrap();
            }));
        }
        for task in tasks {
            task.await.unwrap();
        }

        let bytes = Arc::try_unwrap(writer).unwrap().into_inner();
        let output = String::from_utf8(bytes).unwrap();
        let mut lines: Vec<_> = output.lines().collect();
        assert_eq!(lines.len(), 32);

        lines.sort_unstable();
        let mut expected: Vec<_> = (0..32).map(|i| format!("{}", i).repeat(200)).collect();
        expected.sort_unstable();
        assert_eq!(lines, expected);
    }

    #[tokio::test]
    async fn test_shutdown_closes_peer() {
        use tokio::io::AsyncReadExt;

        let (local, mut remote) = tokio::io::duplex(64);
        let writer = LineWriter::new(local);
        writer.send("bye").await.unwrap();
        writer.shutdown().await.unwrap();

        let mut received = String::new();
        remote.read_to_string(&mut received).await.unwrap();
        assert_eq!(received, "bye\n");
    }
}
