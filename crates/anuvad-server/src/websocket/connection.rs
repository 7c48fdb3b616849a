//! WebSocket upgrade and the axum-backed transport.

use std::error::Error as StdError;
use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::ws::{CloseFrame, Message, Utf8Bytes, WebSocket, WebSocketUpgrade, close_code};
use axum::extract::{Query, State};
use axum::response::Response;
use serde::Deserialize;
use tokio_tungstenite::tungstenite::Error as WsError;
use tokio_tungstenite::tungstenite::error::ProtocolError;
use tracing::{debug, warn};

use super::session::Session;
use super::transport::{Frame, Transport, TransportError};
use crate::server::AppState;

/// Query parameters accepted on the upgrade request.
#[derive(Debug, Default, Deserialize)]
pub struct ConnectParams {
    /// Target language for the whole session. Not validated here.
    pub lang: Option<String>,
}

/// `GET <ws_path>?lang=<code>`: upgrade and run one session.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Query(params): Query<ConnectParams>,
    State(state): State<AppState>,
) -> Response {
    let target_lang = params
        .lang
        .unwrap_or_else(|| state.default_lang().to_string());
    let translator = Arc::clone(state.translator());

    ws.max_message_size(state.max_message_bytes())
        .on_failed_upgrade(|e| warn!(error = %e, "websocket upgrade failed"))
        .on_upgrade(move |socket| async move {
            let session = Session::accept(AxumTransport::new(socket), target_lang, translator);
            let conn_id = session.conn_id().to_owned();
            let state = session.run().await;
            debug!(%conn_id, ?state, "session task finished");
        })
}

/// [`Transport`] over an upgraded axum socket.
pub struct AxumTransport {
    socket: WebSocket,
    closed: bool,
}

impl AxumTransport {
    /// Wrap an upgraded socket.
    pub fn new(socket: WebSocket) -> Self {
        Self {
            socket,
            closed: false,
        }
    }
}

#[async_trait]
impl Transport for AxumTransport {
    async fn recv(&mut self) -> Result<Frame, TransportError> {
        if self.closed {
            return Ok(Frame::Closed);
        }
        match self.socket.recv().await {
            None => {
                self.closed = true;
                Ok(Frame::Closed)
            }
            Some(Ok(Message::Close(frame))) => {
                debug!(
                    code = frame.as_ref().map(|f| f.code),
                    "peer sent close frame"
                );
                self.closed = true;
                Ok(Frame::Closed)
            }
            Some(Ok(Message::Text(text))) => Ok(Frame::Text(text.as_str().to_owned())),
            Some(Ok(Message::Binary(data))) => Ok(Frame::Binary(data)),
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => Ok(Frame::Control),
            Some(Err(e)) if is_peer_gone(&e) => {
                debug!(error = %e, "peer dropped connection without close frame");
                self.closed = true;
                Ok(Frame::Closed)
            }
            Some(Err(e)) => Err(TransportError::Receive(Box::new(e))),
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        match self.socket.send(Message::Text(text.into())).await {
            Ok(()) => Ok(()),
            Err(e) if is_peer_gone(&e) => {
                debug!(error = %e, "peer gone before reply was written");
                self.closed = true;
                Err(TransportError::PeerGone)
            }
            Err(e) => Err(TransportError::Send(Box::new(e))),
        }
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        let frame = CloseFrame {
            code: close_code::ERROR,
            reason: Utf8Bytes::from_static("internal error"),
        };
        self.socket
            .send(Message::Close(Some(frame)))
            .await
            .map_err(|e| TransportError::Close(Box::new(e)))
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

/// Whether a socket error means the peer went away (dropped TCP, reset,
/// closed mid-write) rather than a failure on our side.
fn is_peer_gone(err: &axum::Error) -> bool {
    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        let gone = e.downcast_ref::<WsError>().is_some_and(ws_peer_gone)
            || e.downcast_ref::<io::Error>().is_some_and(io_peer_gone);
        if gone {
            return true;
        }
        current = e.source();
    }
    false
}

fn ws_peer_gone(err: &WsError) -> bool {
    matches!(
        err,
        WsError::ConnectionClosed
            | WsError::AlreadyClosed
            | WsError::Protocol(ProtocolError::ResetWithoutClosingHandshake)
    )
}

fn io_peer_gone(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            | io::ErrorKind::UnexpectedEof
    )
}
