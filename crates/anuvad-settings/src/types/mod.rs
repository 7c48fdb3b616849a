//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase")]` for the JSON file
//! format. Each type implements [`Default`] with production default values
//! and is marked `#[serde(default)]`, so partial JSON is accepted and missing
//! fields get their default value during deserialization.

mod logging;
mod server;
mod translator;

pub use logging::*;
pub use server::*;
pub use translator::*;

use serde::{Deserialize, Serialize};

/// Root settings type for the relay.
///
/// ```json
/// {
///   "server": { "port": 9000, "defaultLang": "fr" },
///   "translator": { "timeoutMs": 5000 },
///   "logging": { "format": "json" }
/// }
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnuvadSettings {
    /// HTTP/WebSocket listener settings.
    pub server: ServerSettings,
    /// Translation provider settings.
    pub translator: TranslatorSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl AnuvadSettings {
    /// Correct invalid values in place.
    ///
    /// Called automatically during loading. Bad values are fixed up with a
    /// warning rather than rejected.
    pub fn validate(&mut self) {
        let server = &mut self.server;
        if !server.ws_path.starts_with('/') {
            let fixed = format!("/{}", server.ws_path);
            tracing::warn!(ws_path = %server.ws_path, %fixed, "wsPath must start with '/', correcting");
            server.ws_path = fixed;
        }
        if server.max_message_bytes == 0 {
            tracing::warn!(
                "maxMessageBytes is 0, resetting to {DEFAULT_MAX_MESSAGE_BYTES}"
            );
            server.max_message_bytes = DEFAULT_MAX_MESSAGE_BYTES;
        }
    }
}
