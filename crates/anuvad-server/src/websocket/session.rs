//! Per-connection translation session.
//!
//! A session owns its transport and runs one strictly sequential loop:
//! receive → decode → translate → reply. The next frame is not read until
//! the current one has been replied to or skipped, so replies come back in
//! receive order.
//!
//! ## States
//!
//! `Open` → `Closed` when the peer disconnects, with or without a close
//! handshake, including mid-reply.
//! `Open` → `Errored` when the transport fails (receive, send) or a reply
//! cannot be encoded. Translation failures and bad input never leave `Open`.

use std::time::Instant;

use anuvad_translate::{SharedTranslator, Translator};
use metrics::{counter, gauge, histogram};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use super::protocol::{DecodeError, Inbound, OutboundMessage, decode_inbound};
use super::transport::{Frame, Transport, TransportError};
use crate::metrics::{
    MESSAGES_RECEIVED_TOTAL, MESSAGES_SKIPPED_TOTAL, TRANSLATION_DURATION_SECONDS,
    TRANSLATION_ERRORS_TOTAL, TRANSLATIONS_TOTAL, WS_CONNECTION_DURATION_SECONDS,
    WS_CONNECTIONS_ACTIVE, WS_CONNECTIONS_TOTAL, WS_DISCONNECTIONS_TOTAL,
};

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Accepted and looping.
    Open,
    /// Ended by the peer.
    Closed,
    /// Ended by an unexpected failure.
    Errored,
}

impl SessionState {
    /// `Closed` and `Errored` are final.
    pub fn is_terminal(self) -> bool {
        !matches!(self, Self::Open)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "errored",
        }
    }
}

/// Failures that end a session.
#[derive(Debug, thiserror::Error)]
enum SessionError {
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("failed to encode reply: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One client connection and its target language.
pub struct Session<T: Transport> {
    conn_id: String,
    target_lang: String,
    transport: T,
    translator: SharedTranslator,
    state: SessionState,
}

impl<T: Transport> Session<T> {
    /// Take ownership of an accepted connection.
    ///
    /// `target_lang` is fixed for the session's lifetime and is not checked
    /// here: an unsupported code fails each translation, not the connection.
    pub fn accept(transport: T, target_lang: impl Into<String>, translator: SharedTranslator) -> Self {
        let conn_id = Uuid::now_v7().to_string();
        let target_lang = target_lang.into();
        counter!(WS_CONNECTIONS_TOTAL).increment(1);
        info!(%conn_id, lang = %target_lang, "session started");
        Self {
            conn_id,
            target_lang,
            transport,
            translator,
            state: SessionState::Open,
        }
    }

    /// Connection id used to correlate log lines.
    pub fn conn_id(&self) -> &str {
        &self.conn_id
    }

    /// The session's target language.
    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    /// Current state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until the peer disconnects or the transport fails.
    ///
    /// Returns the terminal state.
    pub async fn run(mut self) -> SessionState {
        let started = Instant::now();
        gauge!(WS_CONNECTIONS_ACTIVE).increment(1.0);

        self.state = match self.message_loop().await {
            Ok(()) => {
                info!(conn_id = %self.conn_id, "client disconnected");
                SessionState::Closed
            }
            Err(e) => {
                error!(conn_id = %self.conn_id, error = %e, "unexpected error in session");
                self.close_quietly().await;
                SessionState::Errored
            }
        };

        gauge!(WS_CONNECTIONS_ACTIVE).decrement(1.0);
        counter!(WS_DISCONNECTIONS_TOTAL, "outcome" => self.state.label()).increment(1);
        histogram!(WS_CONNECTION_DURATION_SECONDS).record(started.elapsed().as_secs_f64());
        self.state
    }

    async fn message_loop(&mut self) -> Result<(), SessionError> {
        loop {
            let frame = match self.transport.recv().await {
                Ok(frame) => frame,
                Err(TransportError::PeerGone) => return Ok(()),
                Err(e) => return Err(e.into()),
            };
            let decoded = match frame {
                Frame::Closed => return Ok(()),
                Frame::Control => continue,
                Frame::Text(raw) => decode_inbound(raw.as_bytes()),
                Frame::Binary(raw) => decode_inbound(&raw),
            };
            counter!(MESSAGES_RECEIVED_TOTAL).increment(1);

            let Some(text) = self.accept_input(decoded) else {
                continue;
            };
            let reply =
                translate_text(self.translator.as_ref(), &self.conn_id, &self.target_lang, &text)
                    .await;
            match self.send(&reply).await {
                Ok(()) => {}
                Err(SessionError::Transport(TransportError::PeerGone)) => {
                    debug!(conn_id = %self.conn_id, "peer left before reply was sent");
                    return Ok(());
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Returns the text to translate, or `None` (logged) when the message is skipped.
    fn accept_input(&self, decoded: Result<Inbound, DecodeError>) -> Option<String> {
        match decoded {
            Ok(Inbound::Translate(text)) => Some(text),
            Ok(Inbound::Empty) => {
                counter!(MESSAGES_SKIPPED_TOTAL, "reason" => "empty").increment(1);
                warn!(conn_id = %self.conn_id, "received empty text, awaiting next message");
                None
            }
            Err(e) => {
                counter!(MESSAGES_SKIPPED_TOTAL, "reason" => "malformed").increment(1);
                warn!(conn_id = %self.conn_id, error = %e, "skipping undecodable message");
                None
            }
        }
    }

    async fn send(&mut self, reply: &OutboundMessage) -> Result<(), SessionError> {
        let json = serde_json::to_string(reply)?;
        self.transport.send_text(json).await?;
        Ok(())
    }

    async fn close_quietly(&mut self) {
        if self.transport.is_closed() {
            return;
        }
        if let Err(e) = self.transport.close().await {
            debug!(conn_id = %self.conn_id, error = %e, "close after session error failed");
        }
    }
}

/// Translate one message and build the reply. Failures become an error
/// reply; nothing here can end the session.
///
/// Must not borrow the session itself: transports are `Send` but not
/// `Sync`, and the session future has to be `Send`.
async fn translate_text(
    translator: &dyn Translator,
    conn_id: &str,
    lang: &str,
    text: &str,
) -> OutboundMessage {
    info!(%conn_id, %lang, text, "received text for translation");
    let started = Instant::now();
    let result = translator.translate(text, lang).await;
    histogram!(TRANSLATION_DURATION_SECONDS).record(started.elapsed().as_secs_f64());

    match result {
        Ok(translated) => {
            counter!(TRANSLATIONS_TOTAL).increment(1);
            info!(%conn_id, translated = %translated, "translation succeeded");
            OutboundMessage::translation(text, translated)
        }
        Err(e) => {
            counter!(TRANSLATION_ERRORS_TOTAL, "kind" => e.kind()).increment(1);
            error!(
                %conn_id,
                %lang,
                text,
                kind = e.kind(),
                error = %e,
                details = ?e,
                "translation failed"
            );
            OutboundMessage::failure(&e)
        }
    }
}
