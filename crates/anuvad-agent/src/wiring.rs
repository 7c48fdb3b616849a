//! Translator construction from settings.

use std::sync::Arc;
use std::time::Duration;

use anuvad_settings::TranslatorSettings;
use anuvad_translate::{
    GoogleConfig, GoogleTranslator, SharedTranslator, TimeoutTranslator, TranslationError,
};
use tracing::info;

/// Map translator settings onto the Google provider config.
pub fn google_config(settings: &TranslatorSettings) -> GoogleConfig {
    GoogleConfig {
        base_url: settings.base_url.clone(),
        source_lang: settings.source_lang.clone(),
        user_agent: settings.user_agent.clone(),
    }
}

/// Build the process-wide translator, bounded by `timeoutMs` unless it is `0`.
pub fn build_translator(settings: &TranslatorSettings) -> Result<SharedTranslator, TranslationError> {
    let provider: SharedTranslator = Arc::new(GoogleTranslator::new(google_config(settings))?);
    if settings.timeout_ms == 0 {
        info!(provider = provider.name(), "translator ready (unbounded)");
        return Ok(provider);
    }
    info!(
        provider = provider.name(),
        timeout_ms = settings.timeout_ms,
        "translator ready"
    );
    Ok(Arc::new(TimeoutTranslator::new(
        provider,
        Duration::from_millis(settings.timeout_ms),
    )))
}
