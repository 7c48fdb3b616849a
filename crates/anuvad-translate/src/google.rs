//! Google provider using the public `translate_a/single` endpoint.
//!
//! The endpoint answers with a nested JSON array. The first element holds
//! one entry per sentence, each with the translated segment at index 0:
//!
//! ```json
//! [[["नमस्ते ", "hello ", null, null, 10], ["दुनिया", "world", null, null, 10]], null, "en"]
//! ```

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use serde_json::Value;
use tracing::{debug, error, instrument};

use crate::errors::{Result, TranslationError};
use crate::translator::Translator;

/// Default provider base URL.
pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

/// Longest provider error body kept in an error message.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Connection settings for [`GoogleTranslator`].
#[derive(Clone, Debug)]
pub struct GoogleConfig {
    /// Base URL without trailing slash.
    pub base_url: String,
    /// Source language code (`auto` for detection).
    pub source_lang: String,
    /// `User-Agent` header value.
    pub user_agent: String,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            source_lang: "auto".to_string(),
            user_agent: concat!("anuvad/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Google translation provider.
pub struct GoogleTranslator {
    config: GoogleConfig,
    client: reqwest::Client,
}

impl GoogleTranslator {
    /// Create a provider with its own HTTP client.
    pub fn new(config: GoogleConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { config, client })
    }

    /// Create a provider with a shared HTTP client.
    #[must_use]
    pub fn with_client(config: GoogleConfig, client: reqwest::Client) -> Self {
        Self { config, client }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/translate_a/single",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &'static str {
        "google"
    }

    #[instrument(skip_all, fields(provider = "google", target_lang = %target_lang, chars = text.chars().count()))]
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        let response = self
            .client
            .get(self.endpoint())
            .query(&[
                ("client", "gtx"),
                ("sl", self.config.source_lang.as_str()),
                ("tl", target_lang),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after_secs = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse().ok());
            error!(status = status.as_u16(), ?retry_after_secs, "Google rate limited");
            return Err(TranslationError::RateLimited { retry_after_secs });
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(status = status.as_u16(), "Google API error");
            return Err(TranslationError::Api {
                status: status.as_u16(),
                message: excerpt(&body),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| TranslationError::InvalidResponse(format!("body is not JSON: {e}")))?;
        let translated = parse_translation(&body)?;
        debug!(chars = translated.chars().count(), "Google translation received");
        Ok(translated)
    }
}

/// Concatenate the translated segments of a `translate_a/single` response.
pub fn parse_translation(body: &Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslationError::InvalidResponse("missing sentence array".into()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|sentence| sentence.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(TranslationError::InvalidResponse(
            "no translated segments".into(),
        ));
    }
    Ok(translated)
}

fn excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= MAX_ERROR_BODY_CHARS {
        return trimmed.to_string();
    }
    let mut cut: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
    cut.push('…');
    cut
}
