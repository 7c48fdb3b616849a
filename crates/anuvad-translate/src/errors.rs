//! Translation gateway errors.

/// Failure of a single translation call.
///
/// Every variant is a per-message failure: callers report it and move on.
#[derive(Debug, thiserror::Error)]
pub enum TranslationError {
    /// The request never produced an HTTP response (DNS, TLS, connection reset...).
    #[error("request to translation provider failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider throttled the request.
    #[error("translation provider rate limited the request{}", retry_hint(*retry_after_secs))]
    RateLimited {
        /// Seconds to wait, from the `Retry-After` header when present.
        retry_after_secs: Option<u64>,
    },

    /// The provider answered with a non-success status. Unsupported language
    /// codes land here.
    #[error("translation provider returned HTTP {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body excerpt.
        message: String,
    },

    /// The provider answered 2xx but the body was not a translation.
    #[error("unexpected response from translation provider: {0}")]
    InvalidResponse(String),

    /// The call exceeded its time bound.
    #[error("translation timed out after {timeout_ms} ms")]
    Timeout {
        /// The bound that was exceeded.
        timeout_ms: u64,
    },
}

fn retry_hint(retry_after_secs: Option<u64>) -> String {
    retry_after_secs.map_or_else(String::new, |s| format!(" (retry after {s}s)"))
}

impl TranslationError {
    /// Stable snake_case label for metrics and structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::RateLimited { .. } => "rate_limited",
            Self::Api { .. } => "api",
            Self::InvalidResponse(_) => "invalid_response",
            Self::Timeout { .. } => "timeout",
        }
    }
}

/// Convenience alias for gateway results.
pub type Result<T> = std::result::Result<T, TranslationError>;
