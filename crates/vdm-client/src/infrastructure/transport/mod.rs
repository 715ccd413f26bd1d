//! Transport: frames routed events and writes them to the remote device.
//!
//! [`FramedEventSink`] is the router's [`RemoteEventSink`].  It encodes each
//! event on the calling thread, stamps it with the next sequence number and
//! queues the bytes on an unbounded channel, so routing never waits on the
//! socket.  [`run_writer`] drains that channel into any `AsyncWrite`.
//!
//! Numbering and queueing happen under one lock, so frames enter the queue
//! (and therefore the socket) in strictly increasing sequence order even when
//! several input threads send at once.
//!
//! Delivery is fire-and-forget: once the writer is gone, further events are
//! logged and discarded.  There is no reconnect.

use std::net::SocketAddr;
use std::sync::{Mutex, PoisonError};

use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use vdm_core::protocol::SequenceCounter;
use vdm_core::{encode_event, RemoteEvent};

use crate::application::route_input::RemoteEventSink;

/// Error type for the outbound connection.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to connect to {addr}: {source}")]
    ConnectFailed {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
    #[error("write to remote device failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Encodes events and hands the frames to the writer task.
pub struct FramedEventSink {
    sequence: SequenceCounter,
    frames: Mutex<mpsc::UnboundedSender<Vec<u8>>>,
}

impl FramedEventSink {
    /// Creates a sink and the receiver its frames arrive on.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Vec<u8>>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = Self {
            sequence: SequenceCounter::new(),
            frames: Mutex::new(tx),
        };
        (sink, rx)
    }

    /// Number of frames handed to the writer so far.
    pub fn frames_issued(&self) -> u64 {
        self.sequence.issued()
    }
}

impl RemoteEventSink for FramedEventSink {
    fn send_event(&self, event: RemoteEvent) {
        let frames = self.frames.lock().unwrap_or_else(PoisonError::into_inner);
        let frame = match encode_event(&event, self.sequence.next()) {
            Ok(frame) => frame,
            Err(e) => {
                error!("failed to encode {:?}: {e}", event.message_type());
                return;
            }
        };
        if frames.send(frame).is_err() {
            warn!(
                "transport closed; dropping {:?} for {}",
                event.message_type(),
                event.display_id()
            );
        }
    }
}

/// Opens the TCP connection to the remote device.
///
/// # Errors
///
/// Returns [`TransportError::ConnectFailed`] if the connection is refused or
/// the address is unreachable.
pub async fn connect(addr: SocketAddr) -> Result<TcpStream, TransportError> {
    let stream = TcpStream::connect(addr)
        .await
        .map_err(|source| TransportError::ConnectFailed { addr, source })?;
    // Input frames are small and latency-sensitive.
    stream.set_nodelay(true)?;
    info!("connected to remote device at {addr}");
    Ok(stream)
}

/// Writes every queued frame to `writer` until all senders are dropped.
///
/// # Errors
///
/// Returns [`TransportError::Io`] on the first failed write; remaining
/// frames are discarded.
pub async fn run_writer<W>(
    mut writer: W,
    mut frames: mpsc::UnboundedReceiver<Vec<u8>>,
) -> Result<(), TransportError>
where
    W: AsyncWrite + Unpin,
{
    let mut written: u64 = 0;
    while let Some(frame) = frames.recv().await {
        writer.write_all(&frame).await?;
        written += 1;
        // Flush only once the queue is momentarily empty.
        if frames.is_empty() {
            writer.flush().await?;
        }
    }
    writer.flush().await?;
    debug!("transport writer finished after {written} frames");
    Ok(())
}
