//! In-memory transport and translator doubles for session tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anuvad_translate::{SharedTranslator, TranslationError, Translator};
use async_trait::async_trait;
use tokio::sync::mpsc;

use super::transport::{Frame, Transport, TransportError};

type Inbound = Result<Frame, TransportError>;

/// Channel-backed transport. The paired [`TransportHandle`] plays the peer.
pub(crate) struct ChannelTransport {
    inbound: mpsc::UnboundedReceiver<Inbound>,
    outbound: mpsc::UnboundedSender<String>,
    close_calls: Arc<AtomicUsize>,
    send_attempts: Arc<AtomicUsize>,
    closed: bool,
    fail_sends: bool,
    peer_gone_on_send: bool,
    fail_close: bool,
}

/// Peer side of a [`ChannelTransport`].
pub(crate) struct TransportHandle {
    inbound: Option<mpsc::UnboundedSender<Inbound>>,
    replies: mpsc::UnboundedReceiver<String>,
    close_calls: Arc<AtomicUsize>,
    send_attempts: Arc<AtomicUsize>,
}

impl ChannelTransport {
    pub(crate) fn new() -> (Self, TransportHandle) {
        let (in_tx, in_rx) = mpsc::unbounded_channel();
        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let close_calls = Arc::new(AtomicUsize::new(0));
        let send_attempts = Arc::new(AtomicUsize::new(0));
        let transport = Self {
            inbound: in_rx,
            outbound: out_tx,
            close_calls: Arc::clone(&close_calls),
            send_attempts: Arc::clone(&send_attempts),
            closed: false,
            fail_sends: false,
            peer_gone_on_send: false,
            fail_close: false,
        };
        let handle = TransportHandle {
            inbound: Some(in_tx),
            replies: out_rx,
            close_calls,
            send_attempts,
        };
        (transport, handle)
    }

    pub(crate) fn failing_sends(mut self) -> Self {
        self.fail_sends = true;
        self
    }

    /// Sends fail as if the peer hung up mid-write.
    pub(crate) fn peer_gone_on_send(mut self) -> Self {
        self.peer_gone_on_send = true;
        self
    }

    pub(crate) fn failing_close(mut self) -> Self {
        self.fail_close = true;
        self
    }

    pub(crate) fn already_closed(mut self) -> Self {
        self.closed = true;
        self
    }
}

#[async_trait]
impl Transport for ChannelTransport {
    async fn recv(&mut self) -> Result<Frame, TransportError> {
        match self.inbound.recv().await {
            Some(Ok(Frame::Closed)) | None => {
                self.closed = true;
                Ok(Frame::Closed)
            }
            Some(other) => other,
        }
    }

    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        let _ = self.send_attempts.fetch_add(1, Ordering::SeqCst);
        if self.peer_gone_on_send {
            self.closed = true;
            return Err(TransportError::PeerGone);
        }
        if self.fail_sends {
            return Err(TransportError::Send("broken pipe".into()));
        }
        self.outbound
            .send(text)
            .map_err(|e| TransportError::Send(e.to_string().into()))
    }

    async fn close(&mut self) -> Result<(), TransportError> {
        let _ = self.close_calls.fetch_add(1, Ordering::SeqCst);
        self.closed = true;
        if self.fail_close {
            return Err(TransportError::Close("already gone".into()));
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.closed
    }
}

impl TransportHandle {
    /// Queue a frame for the session to receive.
    pub(crate) fn push(&self, frame: Inbound) {
        if let Some(tx) = &self.inbound {
            let _ = tx.send(frame);
        }
    }

    /// Hang up: the session sees [`Frame::Closed`] after queued frames.
    pub(crate) fn end_input(&mut self) {
        self.inbound = None;
    }

    /// Replies sent so far, in order.
    pub(crate) fn drain_replies(&mut self) -> Vec<String> {
        let mut out = Vec::new();
        while let Ok(reply) = self.replies.try_recv() {
            out.push(reply);
        }
        out
    }

    pub(crate) fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn send_attempts(&self) -> usize {
        self.send_attempts.load(Ordering::SeqCst)
    }
}

/// Deterministic translator: `hello`→`नमस्ते` for `hi`, otherwise
/// `<text>@<lang>`. Text starting with `fail` errors.
pub(crate) struct StubTranslator;

impl StubTranslator {
    pub(crate) fn shared() -> SharedTranslator {
        Arc::new(Self)
    }
}

#[async_trait]
impl Translator for StubTranslator {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> anuvad_translate::Result<String> {
        if text.starts_with("fail") {
            return Err(TranslationError::InvalidResponse(format!("stub refused '{text}'")));
        }
        if text == "hello" && target_lang == "hi" {
            return Ok("नमस्ते".to_string());
        }
        Ok(format!("{text}@{target_lang}"))
    }
}
