//! The connection a session owns.

use async_trait::async_trait;
use bytes::Bytes;

/// Boxed error from the underlying socket implementation.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// One inbound event from the peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 text frame.
    Text(String),
    /// Binary frame.
    Binary(Bytes),
    /// Ping/pong. Carries no payload for the session.
    Control,
    /// The peer closed the connection (close frame or end of stream).
    Closed,
}

/// Transport failures. All of them end the session; only [`PeerGone`]
/// ends it cleanly.
///
/// [`PeerGone`]: TransportError::PeerGone
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The peer dropped the connection without a close handshake.
    #[error("peer went away")]
    PeerGone,
    /// Reading the next frame failed.
    #[error("failed to receive frame: {0}")]
    Receive(#[source] BoxError),
    /// Writing a reply failed.
    #[error("failed to send frame: {0}")]
    Send(#[source] BoxError),
    /// Closing the connection failed.
    #[error("failed to close connection: {0}")]
    Close(#[source] BoxError),
}

/// Bidirectional message connection owned by exactly one session.
#[async_trait]
pub trait Transport: Send {
    /// Wait for the next frame. Returns [`Frame::Closed`] once the peer is gone.
    async fn recv(&mut self) -> Result<Frame, TransportError>;

    /// Send one text frame.
    async fn send_text(&mut self, text: String) -> Result<(), TransportError>;

    /// Close the connection from our side.
    async fn close(&mut self) -> Result<(), TransportError>;

    /// Whether the connection is already closed in either direction.
    fn is_closed(&self) -> bool;
}
