//! Server lifecycle errors.

/// Errors starting or stopping the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured WebSocket path cannot be routed.
    #[error("invalid websocket path '{0}': must start with '/' and not shadow /health or /metrics")]
    InvalidWsPath(String),

    /// The listener could not bind.
    #[error("failed to bind {addr}: {source}")]
    Bind {
        /// Requested address.
        addr: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// I/O failure while serving.
    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The serve task panicked or was aborted.
    #[error("server task failed: {0}")]
    Task(String),
}
