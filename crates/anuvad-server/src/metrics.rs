//! Prometheus metrics recorder and metric names.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

/// Install the Prometheus metrics recorder (global).
///
/// Returns the `PrometheusHandle` used to render the `/metrics` endpoint.
/// Call once at start-up before any metrics are recorded.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    info!("prometheus metrics recorder installed");
    Ok(handle)
}

// Metric name constants to avoid typos across modules.

/// WebSocket sessions accepted (counter).
pub const WS_CONNECTIONS_TOTAL: &str = "ws_connections_total";
/// Active WebSocket sessions (gauge).
pub const WS_CONNECTIONS_ACTIVE: &str = "ws_connections_active";
/// Sessions ended (counter, labels: outcome).
pub const WS_DISCONNECTIONS_TOTAL: &str = "ws_disconnections_total";
/// Session lifetime in seconds (histogram).
pub const WS_CONNECTION_DURATION_SECONDS: &str = "ws_connection_duration_seconds";
/// Data frames received (counter).
pub const MESSAGES_RECEIVED_TOTAL: &str = "messages_received_total";
/// Data frames dropped without a reply (counter, labels: reason).
pub const MESSAGES_SKIPPED_TOTAL: &str = "messages_skipped_total";
/// Successful translations (counter).
pub const TRANSLATIONS_TOTAL: &str = "translations_total";
/// Failed translations (counter, labels: kind).
pub const TRANSLATION_ERRORS_TOTAL: &str = "translation_errors_total";
/// Translation call duration in seconds, successes and failures (histogram).
pub const TRANSLATION_DURATION_SECONDS: &str = "translation_duration_seconds";
