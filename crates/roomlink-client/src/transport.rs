//! Host transports.
//!
//! The bridge never knows which host it talks to. It hands [`OutboundFrame`]s
//! to a [`Transport`] picked at construction and reads raw inbound lines from
//! a channel the transport fills. [`HostChannel`] talks to a real host;
//! [`crate::mock::MockHost`] answers in memory.

use roomlink_proto::OutboundFrame;
use tokio::{
    io::{AsyncBufReadExt, AsyncWriteExt, BufReader},
    net::{
        TcpStream,
        tcp::{OwnedReadHalf, OwnedWriteHalf},
    },
    sync::mpsc,
    task::AbortHandle,
};

use crate::error::TransportError;

/// Something that can carry frames to the host.
///
/// Delivery is fire-and-forget: success means the frame was queued, not that
/// the host processed it.
pub trait Transport: Send + Sync + 'static {
    /// Queue one frame for the host.
    fn deliver(&self, frame: OutboundFrame) -> Result<(), TransportError>;
}

/// Line-delimited JSON connection to the native host.
///
/// Each outbound frame is written as one line (`{"postMessage":"..."}`,
/// `{"doCommand":"..."}` or `{"launchApp":"..."}`); each inbound line is a raw
/// envelope. Reading and writing run as separate tasks so a slow host never
/// blocks the UI.
pub struct HostChannel {
    outbound: mpsc::UnboundedSender<String>,
    reader: AbortHandle,
    writer: AbortHandle,
}

impl HostChannel {
    /// Connect to a host listening on `addr`.
    ///
    /// Returns the transport and the receiver that yields inbound lines, to be
    /// handed to [`crate::Bridge::start`].
    pub async fn connect(
        addr: &str,
    ) -> Result<(Self, mpsc::UnboundedReceiver<String>), TransportError> {
        let stream = TcpStream::connect(addr)
            .await
            .map_err(|e| TransportError::Connection(format!("{addr}: {e}")))?;
        tracing::info!(%addr, "connected to host");
        Ok(Self::from_stream(stream))
    }

    /// Wrap an already connected stream.
    pub fn from_stream(stream: TcpStream) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (read_half, write_half) = stream.into_split();
        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let (inbound_tx, inbound_rx) = mpsc::unbounded_channel();

        let reader = tokio::spawn(read_lines(read_half, inbound_tx));
        let writer = tokio::spawn(write_lines(write_half, outbound_rx));

        let channel = Self {
            outbound: outbound_tx,
            reader: reader.abort_handle(),
            writer: writer.abort_handle(),
        };
        (channel, inbound_rx)
    }

    /// Stop both I/O tasks. Later deliveries fail with
    /// [`TransportError::Closed`].
    pub fn stop(&self) {
        self.reader.abort();
        self.writer.abort();
    }
}

impl Drop for HostChannel {
    fn drop(&mut self) {
        self.stop();
    }
}

impl Transport for HostChannel {
    fn deliver(&self, frame: OutboundFrame) -> Result<(), TransportError> {
        let line = frame.encode_line()?;
        self.outbound.send(line).map_err(|_| TransportError::Closed)
    }
}

async fn read_lines(read: OwnedReadHalf, inbound: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(read).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if line.trim().is_empty() => {},
            Ok(Some(line)) => {
                if inbound.send(line).is_err() {
                    break;
                }
            },
            Ok(None) => {
                tracing::info!("host closed the channel");
                break;
            },
            Err(e) => {
                tracing::warn!(error = %e, "host channel read failed");
                break;
            },
        }
    }
}

async fn write_lines(mut write: OwnedWriteHalf, mut outbound: mpsc::UnboundedReceiver<String>) {
    while let Some(mut line) = outbound.recv().await {
        line.push('\n');
        if let Err(e) = write.write_all(line.as_bytes()).await {
            tracing::warn!(error = %e, "host channel write failed");
            break;
        }
    }
}
