//! Time bound for translator calls.

use std::time::Duration;

use async_trait::async_trait;
use tracing::warn;

use crate::errors::{Result, TranslationError};
use crate::translator::{SharedTranslator, Translator};

/// Wraps a translator so every call finishes within `timeout`.
///
/// An expired call becomes [`TranslationError::Timeout`] and the inner
/// future is dropped.
pub struct TimeoutTranslator {
    inner: SharedTranslator,
    timeout: Duration,
}

impl TimeoutTranslator {
    /// Bound `inner` by `timeout`.
    pub fn new(inner: SharedTranslator, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// The configured bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl Translator for TimeoutTranslator {
    fn name(&self) -> &'static str {
        self.inner.name()
    }

    async fn translate(&self, text: &str, target_lang: &str) -> Result<String> {
        match tokio::time::timeout(self.timeout, self.inner.translate(text, target_lang)).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(provider = self.inner.name(), timeout_ms, "translation call timed out");
                Err(TranslationError::Timeout { timeout_ms })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    struct SlowTranslator {
        delay: Duration,
    }

    #[async_trait]
    impl Translator for SlowTranslator {
        fn name(&self) -> &'static str {
            "slow"
        }

        async fn translate(&self, text: &str, _target_lang: &str) -> Result<String> {
            tokio::time::sleep(self.delay).await;
            Ok(text.to_uppercase())
        }
    }

    fn bounded(delay_ms: u64, timeout_ms: u64) -> TimeoutTranslator {
        TimeoutTranslator::new(
            Arc::new(SlowTranslator {
                delay: Duration::from_millis(delay_ms),
            }),
            Duration::from_millis(timeout_ms),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn fast_call_passes_through() {
        let translator = bounded(10, 1_000);
        assert_eq!(translator.translate("hi", "en").await.unwrap(), "HI");
    }

    #[tokio::test(start_paused = true)]
    async fn slow_call_times_out() {
        let translator = bounded(5_000, 100);
        let err = translator.translate("hi", "en").await.unwrap_err();
        assert!(matches!(err, TranslationError::Timeout { timeout_ms: 100 }));
    }

    #[test]
    fn name_delegates_to_inner() {
        let translator = bounded(0, 1);
        assert_eq!(translator.name(), "slow");
        assert_eq!(translator.timeout(), Duration::from_millis(1));
    }
}
