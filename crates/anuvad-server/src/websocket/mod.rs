//! WebSocket sessions: upgrade, transport, wire protocol, message loop.
//!
//! ## Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `connection` | HTTP upgrade handler, axum-backed [`transport::Transport`] |
//! | `transport` | Connection seam owned by a session (frames, send, close) |
//! | `protocol` | Inbound decoding and outbound reply shapes |
//! | `session` | Per-connection state machine and receive/translate/reply loop |
//!
//! ## Data Flow
//!
//! `connection` → `session` (decode via `protocol`) → translator → reply.

pub mod connection;
pub mod protocol;
pub mod session;
pub mod transport;

#[cfg(test)]
pub(crate) mod testutil;
