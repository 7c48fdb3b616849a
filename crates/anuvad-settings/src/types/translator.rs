//! Translation provider settings.

use serde::{Deserialize, Serialize};

/// Settings for the Google translation provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslatorSettings {
    /// Provider base URL (no trailing slash).
    pub base_url: String,
    /// Source language code; `auto` lets the provider detect it.
    pub source_lang: String,
    /// Upper bound on a single translation call in milliseconds. `0` disables the bound.
    pub timeout_ms: u64,
    /// `User-Agent` header sent to the provider.
    pub user_agent: String,
}

impl Default for TranslatorSettings {
    fn default() -> Self {
        Self {
            base_url: "https://translate.googleapis.com".to_string(),
            source_lang: "auto".to_string(),
            timeout_ms: 10_000,
            user_agent: concat!("anuvad/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}
