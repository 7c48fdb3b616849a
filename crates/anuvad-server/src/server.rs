//! Router, shared state, and server lifecycle.

use std::net::SocketAddr;
use std::sync::Arc;

use anuvad_settings::ServerSettings;
use anuvad_translate::SharedTranslator;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::get;
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::errors::ServerError;
use crate::websocket::connection::ws_handler;

/// Paths reserved for operational endpoints.
const RESERVED_PATHS: [&str; 2] = ["/health", "/metrics"];

/// Listener and session parameters.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Bind address.
    pub host: String,
    /// Bind port (`0` for ephemeral).
    pub port: u16,
    /// WebSocket endpoint path.
    pub ws_path: String,
    /// Target language when the client omits `?lang=`.
    pub default_lang: String,
    /// Largest inbound message accepted.
    pub max_message_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSettings::default())
    }
}

impl From<&ServerSettings> for ServerConfig {
    fn from(settings: &ServerSettings) -> Self {
        Self {
            host: settings.host.clone(),
            port: settings.port,
            ws_path: settings.ws_path.clone(),
            default_lang: settings.default_lang.clone(),
            max_message_bytes: settings.max_message_bytes,
        }
    }
}

/// State shared by all handlers. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    translator: SharedTranslator,
    default_lang: Arc<str>,
    max_message_bytes: usize,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build handler state.
    pub fn new(
        translator: SharedTranslator,
        config: &ServerConfig,
        metrics: Option<PrometheusHandle>,
    ) -> Self {
        Self {
            translator,
            default_lang: Arc::from(config.default_lang.as_str()),
            max_message_bytes: config.max_message_bytes,
            metrics,
        }
    }

    /// The translator every session shares.
    pub fn translator(&self) -> &SharedTranslator {
        &self.translator
    }

    /// Fallback target language.
    pub fn default_lang(&self) -> &str {
        &self.default_lang
    }

    /// Inbound message size limit.
    pub fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }
}

/// Build the application router.
///
/// Panics (inside axum) if `ws_path` is not routable; [`start`] checks it first.
pub fn build_router(ws_path: &str, state: AppState) -> Router {
    Router::new()
        .route(ws_path, get(ws_handler))
        .route("/health", get(health))
        .route("/metrics", get(metrics_endpoint))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn metrics_endpoint(State(state): State<AppState>) -> Response {
    match &state.metrics {
        Some(handle) => handle.render().into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn validate_ws_path(path: &str) -> Result<(), ServerError> {
    if !path.starts_with('/') || path.len() < 2 || RESERVED_PATHS.contains(&path) {
        return Err(ServerError::InvalidWsPath(path.to_string()));
    }
    Ok(())
}

/// A running server.
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<std::io::Result<()>>,
}

impl ServerHandle {
    /// The bound address (resolves port `0`).
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stop accepting connections and wait for the serve loop to exit.
    pub async fn shutdown(self) -> Result<(), ServerError> {
        self.shutdown.cancel();
        match self.task.await {
            Ok(result) => result.map_err(ServerError::Io),
            Err(e) => Err(ServerError::Task(e.to_string())),
        }
    }
}

/// Bind and serve in a background task.
pub async fn start(
    config: ServerConfig,
    translator: SharedTranslator,
    metrics: Option<PrometheusHandle>,
) -> Result<ServerHandle, ServerError> {
    validate_ws_path(&config.ws_path)?;

    let state = AppState::new(translator, &config, metrics);
    let router = build_router(&config.ws_path, state);

    let listener = TcpListener::bind((config.host.as_str(), config.port))
        .await
        .map_err(|source| ServerError::Bind {
            addr: format!("{}:{}", config.host, config.port),
            source,
        })?;
    let local_addr = listener.local_addr()?;

    let shutdown = CancellationToken::new();
    let token = shutdown.clone();
    let task = tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async move { token.cancelled().await })
            .await
    });

    info!(
        %local_addr,
        ws_path = %config.ws_path,
        default_lang = %config.default_lang,
        "server listening"
    );
    Ok(ServerHandle {
        local_addr,
        shutdown,
        task,
    })
}
