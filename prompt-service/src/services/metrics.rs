//! Prometheus metrics for prompt-service.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<Result<PrometheusHandle, String>> = OnceLock::new();

/// Install the global Prometheus recorder.
///
/// Safe to call more than once; only the first call installs anything.
pub fn init_metrics() -> anyhow::Result<()> {
    METRICS_HANDLE
        .get_or_init(|| {
            PrometheusBuilder::new()
                .install_recorder()
                .map_err(|e| e.to_string())
        })
        .as_ref()
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("failed to install Prometheus recorder: {}", e))
}

pub fn get_metrics() -> String {
    match METRICS_HANDLE.get() {
        Some(Ok(handle)) => handle.render(),
        _ => "# Metrics recorder not initialized\n".to_string(),
    }
}

/// Record one outbound provider call.
pub fn record_upstream_request(operation: &'static str, outcome: &'static str, elapsed: Duration) {
    let labels = [("operation", operation), ("outcome", outcome)];

    counter!("upstream_requests_total", &labels).increment(1);
    histogram!("upstream_request_duration_seconds", &labels).record(elapsed.as_secs_f64());
}
