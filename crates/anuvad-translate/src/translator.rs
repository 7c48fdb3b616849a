//! The gateway trait.

use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::Result;

/// A remote translation provider.
///
/// One instance is built at start-up and shared by every session, so
/// implementations must tolerate concurrent calls. Interior state such as
/// an HTTP connection pool is fine; per-call mutation visible to other
/// callers is not.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Short provider name for logs and metrics.
    fn name(&self) -> &'static str;

    /// Translate `text` into `target_lang`.
    ///
    /// The provider is the authority on valid language codes: an unknown
    /// code is a per-call error, never a panic.
    async fn translate(&self, text: &str, target_lang: &str) -> Result<String>;
}

/// Translator shared across session tasks.
pub type SharedTranslator = Arc<dyn Translator>;
