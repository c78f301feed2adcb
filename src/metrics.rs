use std::sync::OnceLock;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

static HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the Prometheus exporter and register all application metrics.
/// Only one recorder may exist per process, so later calls return the
/// handle from the first install.
pub fn init_metrics() -> PrometheusHandle {
    HANDLE
        .get_or_init(|| {
            let handle = PrometheusBuilder::new()
                .install_recorder()
                .expect("failed to install Prometheus recorder");

            // Pre-register so the series appear before the first poll.
            counter!("status_polls_total").absolute(0);
            counter!("status_poll_failures_total").absolute(0);
            gauge!("bot_equity").set(0.0);
            gauge!("bot_all_time_high").set(0.0);
            gauge!("reconciled_trades").set(0.0);
            histogram!("status_poll_latency_seconds").record(0.0);

            handle
        })
        .clone()
}
