//! Transport binding for the line protocol
//!
//! This module connects the protocol engine to a byte stream:
//! - TCP connect with connection events re-emitted on the bus
//! - One reader task per connection pumping bytes into the engine
//! - A shared, mutex-guarded line writer for outbound text

pub mod stream;
pub mod writer;

pub use stream::pump_lines;
pub use writer::LineWriter;

use std::sync::Arc;
use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use crate::config::ClientConfig;
use crate::engine::ProtocolEngine;
use crate::events::EventBus;
use crate::types::{ChatEvent, Endpoint};
use crate::{CoreError, Result};

/// Type-erased write half shared by every `send`
pub type BoxedWriter = Box<dyn AsyncWrite + Send + Unpin>;

/// One connection to a chat server
///
/// Events go to the `EventBus` given at construction; `send` is the only
/// outbound operation. Dropping the client stops the reader task without
/// publishing `ConnectionLost`.
pub struct ChatClient {
    endpoint: Endpoint,
    writer: Arc<LineWriter<BoxedWriter>>,
    reader: JoinHandle<Result<()>>,
    bus: Arc<EventBus>,
}

impl ChatClient {
    /// Connect over TCP
    ///
    /// # Behavior
    /// 1. Resolve and connect to `config.endpoint`
    /// 2. Publish `ConnectionEstablished`
    /// 3. Spawn the reader task
    ///
    /// On failure `ConnectionLost` is published and the error is returned.
    pub async fn connect(config: ClientConfig, bus: Arc<EventBus>) -> Result<Self> {
        let endpoint = config.endpoint.clone();
        tracing::info!("Connecting to {}", endpoint);

        let stream = match TcpStream::connect((endpoint.host(), endpoint.port())).await {
            Ok(stream) => stream,
            Err(e) => {
                tracing::warn!("Connection to {} failed: {}", endpoint, e);
                bus.publish(&ChatEvent::ConnectionLost);
                return Err(CoreError::Connection(format!(
                    "Failed to connect to {}: {}",
                    endpoint, e
                )));
            }
        };

        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!("Could not set TCP_NODELAY: {}", e);
        }

        Ok(Self::from_stream(stream, config, bus))
    }

    /// Run the protocol over an already-connected stream
    ///
    /// Must be called from within a Tokio runtime.
    pub fn from_stream<S>(stream: S, config: ClientConfig, bus: Arc<EventBus>) -> Self
    where
        S: AsyncRead + AsyncWrite + Send + 'static,
    {
        let (read_half, write_half) = tokio::io::split(stream);

        let engine = ProtocolEngine::new(config.framer, bus.clone());
        engine.connection_established(&config.endpoint);

        let reader = tokio::spawn(pump_lines(read_half, engine, config.read_buffer_size));
        let writer: BoxedWriter = Box::new(write_half);

        Self {
            endpoint: config.endpoint,
            writer: Arc::new(LineWriter::new(writer)),
            reader,
            bus,
        }
    }

    /// Send one line of text; a `\n` terminator is appended
    pub async fn send(&self, text: &str) -> Result<()> {
        if !self.is_connected() {
            return Err(CoreError::NotConnected);
        }
        self.writer.send(text).await
    }

    /// Writer handle for sending from other tasks
    pub fn writer(&self) -> Arc<LineWriter<BoxedWriter>> {
        self.writer.clone()
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    pub fn bus(&self) -> &Arc<EventBus> {
        &self.bus
    }

    /// True until the reader task has stopped
    pub fn is_connected(&self) -> bool {
        !self.reader.is_finished()
    }

    /// Close the connection
    ///
    /// Shuts the write side down and stops the reader. `ConnectionLost` is
    /// published exactly once: by the reader if it already saw the stream
    /// end, otherwise here.
    pub async fn close(mut self) -> Result<()> {
        if let Err(e) = self.writer.shutdown().await {
            tracing::debug!("Shutdown of write side failed: {}", e);
        }

        self.reader.abort();
        match (&mut self.reader).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(CoreError::LineTooLong { .. })) => Ok(()),
            Ok(Err(e)) => Err(e),
            Err(e) if e.is_cancelled() => {
                self.bus.publish(&ChatEvent::ConnectionLost);
                Ok(())
            }
            Err(e) => Err(CoreError::Connection(format!("Reader task failed: {}", e))),
        }
    }
}

impl Drop for ChatClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

impl std::fmt::Debug for ChatClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatClient")
            .field("endpoint", &self.endpoint)
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FramerConfig;
    use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::time::{timeout, Duration};

    async fn next_event(rx: &mut UnboundedReceiver<ChatEvent>) -> ChatEvent {
        timeout(Duration::from_secs(5), rx.recv())
            .await
            .expect("timed out waiting for event")
            .expect("event channel closed")
    }

    #[tokio::test]
    async fn test_from_stream_inbound_and_outbound() {
        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe_channel();

        let (local, remote) = tokio::io::duplex(1024);
        let config = ClientConfig::new(Endpoint::new("linux", 3101));
        let client = ChatClient::from_stream(local, config, bus);

        assert_eq!(
            next_event(&mut rx).await,
            ChatEvent::connection_established("linux", 3101)
        );

        let (remote_read, mut remote_write) = tokio::io::split(remote);
        remote_write
            .write_all(b"#alias bob\n#list alice bob\nhello everyone\n")
            .await
            .unwrap();

        assert_eq!(next_event(&mut rx).await, ChatEvent::alias_changed("bob"));
        assert_eq!(next_event(&mut rx).await, ChatEvent::user_list(["alice", "bob"]));
        assert_eq!(next_event(&mut rx).await, ChatEvent::chat_message("hello everyone"));

        client.send("ping").await.unwrap();
        let mut lines = BufReader::new(remote_read).lines();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("ping"));

        drop(remote_write);
        drop(lines);
        assert_eq!(next_event(&mut rx).await, ChatEvent::ConnectionLost);
    }

    #[tokio::test]
    async fn test_send_after_peer_closed_is_not_connected() {
        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe_channel();

        let (local, remote) = tokio::io::duplex(64);
        let client = ChatClient::from_stream(local, ClientConfig::default(), bus);
        drop(remote);

        assert!(matches!(next_event(&mut rx).await, ChatEvent::ConnectionEstablished { .. }));
        assert_eq!(next_event(&mut rx).await, ChatEvent::ConnectionLost);

        // Reader publishes before its task completes
        timeout(Duration::from_secs(5), async {
            while client.is_connected() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();

        assert!(matches!(client.send("late").await, Err(CoreError::NotConnected)));
    }

    #[tokio::test]
    async fn test_close_publishes_connection_lost_once() {
        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe_channel();

        let (local, mut remote) = tokio::io::duplex(64);
        let client = ChatClient::from_stream(local, ClientConfig::default(), bus.clone());
        assert!(matches!(next_event(&mut rx).await, ChatEvent::ConnectionEstablished { .. }));

        client.close().await.unwrap();
        assert_eq!(next_event(&mut rx).await, ChatEvent::ConnectionLost);

        let mut rest = Vec::new();
        remote.read_to_end(&mut rest).await.unwrap();
        assert!(rest.is_empty());

        bus.publish(&ChatEvent::error("marker"));
        assert_eq!(next_event(&mut rx).await, ChatEvent::error("marker"));
    }

    #[tokio::test]
    async fn test_overflow_closes_connection() {
        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe_channel();

        let (local, mut remote) = tokio::io::duplex(1024);
        let config = ClientConfig::default().with_framer(FramerConfig::with_max_line_length(16));
        let _client = ChatClient::from_stream(local, config, bus);
        assert!(matches!(next_event(&mut rx).await, ChatEvent::ConnectionEstablished { .. }));

        remote.write_all(&[b'x'; 64]).await.unwrap();
        assert_eq!(next_event(&mut rx).await, ChatEvent::ConnectionLost);
    }

    #[tokio::test]
    async fn test_tcp_connect_roundtrip() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();

        let server = tokio::spawn(async move {
            let (socket, _) = listener.accept().await.unwrap();
            let (read, mut write) = socket.into_split();
            write.write_all(b"#connected alice\n").await.unwrap();

            let mut lines = BufReader::new(read).lines();
            lines.next_line().await.unwrap()
        });

        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe_channel();
        let config = ClientConfig::new(Endpoint::new("127.0.0.1", port));
        let client = ChatClient::connect(config, bus).await.unwrap();

        assert_eq!(
            next_event(&mut rx).await,
            ChatEvent::connection_established("127.0.0.1", port)
        );
        assert_eq!(next_event(&mut rx).await, ChatEvent::user_connected("alice"));

        client.send("bob").await.unwrap();
        assert_eq!(server.await.unwrap().as_deref(), Some("bob"));
    }

    #[tokio::test]
    async fn test_tcp_connect_refused_publishes_connection_lost() {
        // Bind then drop to get a port with nothing listening
        let port = {
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            listener.local_addr().unwrap().port()
        };

        let bus = Arc::new(EventBus::new());
        let mut rx = bus.subscribe_channel();
        let config = ClientConfig::new(Endpoint::new("127.0.0.1", port));

        let result = ChatClient::connect(config, bus).await;
        assert!(matches!(result, Err(CoreError::Connection(_))));
        assert_eq!(next_event(&mut rx).await, ChatEvent::ConnectionLost);
    }
}
