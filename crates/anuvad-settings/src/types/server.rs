//! Server network settings.

use serde::{Deserialize, Serialize};

/// Default maximum inbound WebSocket message size (64 KiB).
pub const DEFAULT_MAX_MESSAGE_BYTES: usize = 64 * 1024;

/// HTTP/WebSocket listener settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ServerSettings {
    /// Bind address.
    pub host: String,
    /// Bind port. `0` picks an ephemeral port.
    pub port: u16,
    /// Path of the translation WebSocket endpoint.
    pub ws_path: String,
    /// Target language used when a client omits `?lang=`.
    pub default_lang: String,
    /// Largest inbound message accepted on a session.
    pub max_message_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            ws_path: "/ws".to_string(),
            default_lang: "hi".to_string(),
            max_message_bytes: DEFAULT_MAX_MESSAGE_BYTES,
        }
    }
}
