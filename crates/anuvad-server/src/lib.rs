//! # anuvad-server
//!
//! Axum HTTP + WebSocket server for the translation relay.
//!
//! Each client opens `GET /ws?lang=<code>`, streams `{"text": ...}` messages
//! and receives `{"original", "translated"}` or `{"error"}` replies on the
//! same socket. Every connection runs as an independent [`Session`] on its
//! own task. The only state shared between sessions is the translator.
//!
//! - **Server**: [`start`] binds and serves, [`ServerHandle`] stops it
//! - **Sessions**: [`websocket::session`] owns the per-connection loop
//! - **Metrics**: [`metrics`] holds the Prometheus recorder and metric names
//!
//! ## Crate Position
//!
//! Depends on: anuvad-settings, anuvad-translate.
//! Depended on by: anuvad-agent.

#![deny(unsafe_code)]

pub mod errors;
pub mod metrics;
pub mod server;
pub mod websocket;

pub use errors::ServerError;
pub use server::{AppState, ServerConfig, ServerHandle, build_router, start};
pub use websocket::session::{Session, SessionState};
