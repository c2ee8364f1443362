//! TCP transport for the client.
//!
//! Provides [`Connection`], which owns the socket for one session. The read
//! half is moved into a spawned receive loop that forwards raw chunks as
//! [`TransportEvent`]s over a channel; the write half stays with the
//! connection so sends never contend with the reader.
//!
//! Chunks are transport reads, not messages. The protocol has no framing, so
//! the caller treats each chunk as one message and accepts that the kernel may
//! split or coalesce writes.

use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWriteExt},
    net::{TcpStream, tcp::OwnedWriteHalf},
    sync::mpsc,
    task::JoinHandle,
};

use crate::{ConnectError, Endpoint, ReadError, WriteError};

/// Size of a single socket read.
pub const READ_BUFFER_SIZE: usize = 1024;

/// Chunks buffered between the receive loop and the session.
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// What the receive loop observed on the socket.
#[derive(Debug)]
pub enum TransportEvent {
    /// Non-empty chunk of raw bytes.
    Chunk(Vec<u8>),
    /// Peer closed the stream.
    Closed,
    /// Read failed. The loop has stopped.
    Failed(ReadError),
}

/// Reads raw chunks of at most [`READ_BUFFER_SIZE`] bytes.
pub struct ChunkReader<R> {
    inner: R,
    buf: Box<[u8]>,
}

impl<R: AsyncRead + Unpin> ChunkReader<R> {
    /// Wrap a byte stream.
    pub fn new(inner: R) -> Self {
        Self { inner, buf: vec![0; READ_BUFFER_SIZE].into_boxed_slice() }
    }

    /// Next available chunk. An empty chunk means orderly end-of-stream.
    pub async fn read_chunk(&mut self) -> Result<Vec<u8>, ReadError> {
        let n = self.inner.read(&mut self.buf).await?;
        Ok(self.buf[..n].to_vec())
    }
}

/// Open connection to a server.
///
/// Dropping the connection closes it.
pub struct Connection {
    endpoint: Endpoint,
    writer: Option<OwnedWriteHalf>,
    receiver: Option<JoinHandle<()>>,
    events: mpsc::Receiver<TransportEvent>,
}

impl Connection {
    /// Connect to `endpoint` and start the receive loop.
    ///
    /// No data is exchanged before this returns.
    pub async fn open(endpoint: &Endpoint) -> Result<Self, ConnectError> {
        let stream = TcpStream::connect((endpoint.host(), endpoint.port()))
            .await
            .map_err(|source| ConnectError { endpoint: endpoint.clone(), source })?;

        if let Err(e) = stream.set_nodelay(true) {
            tracing::debug!(error = %e, "failed to disable Nagle");
        }

        let (read_half, write_half) = stream.into_split();
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let receiver = tokio::spawn(receive_loop(ChunkReader::new(read_half), tx));

        tracing::debug!(%endpoint, "connection opened");

        Ok(Self {
            endpoint: endpoint.clone(),
            writer: Some(write_half),
            receiver: Some(receiver),
            events: rx,
        })
    }

    /// Whether [`Connection::close`] has not been called yet.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Write the whole buffer.
    pub async fn write(&mut self, bytes: &[u8]) -> Result<(), WriteError> {
        let writer = self.writer.as_mut().ok_or_else(WriteError::closed)?;
        writer.write_all(bytes).await?;
        writer.flush().await?;
        Ok(())
    }

    /// Next event from the receive loop.
    ///
    /// Returns `None` once the loop has stopped and all events are drained.
    /// Cancel-safe.
    pub async fn recv(&mut self) -> Option<TransportEvent> {
        self.events.recv().await
    }

    /// Close the socket. Idempotent.
    ///
    /// Stops the receive loop, which releases the read half, and shuts down
    /// the write half. A pending [`Connection::recv`] then resolves to `None`.
    pub fn close(&mut self) {
        if let Some(receiver) = self.receiver.take() {
            receiver.abort();
        }
        if self.writer.take().is_some() {
            tracing::debug!(endpoint = %self.endpoint, "connection closed");
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        self.close();
    }
}

/// Forward chunks until end-of-stream, a read error, or the receiver is gone.
async fn receive_loop<R>(mut reader: ChunkReader<R>, events: mpsc::Sender<TransportEvent>)
where
    R: AsyncRead + Unpin,
{
    loop {
        let event = match reader.read_chunk().await {
            Ok(chunk) if chunk.is_empty() => TransportEvent::Closed,
            Ok(chunk) => TransportEvent::Chunk(chunk),
            Err(e) => TransportEvent::Failed(e),
        };

        let last = !matches!(event, TransportEvent::Chunk(_));
        if events.send(event).await.is_err() || last {
            break;
        }
    }
}
