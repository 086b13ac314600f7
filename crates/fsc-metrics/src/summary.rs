//! summary — periodic traffic summary logging.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::info;

use crate::counters::ViewCounters;

/// Logs cumulative traffic totals on a fixed interval until shutdown.
///
/// Counts are cumulative since process start, matching the Prometheus
/// exposition, so a dropped log line never loses traffic.
pub async fn run_summary_logger(
    counters: Arc<ViewCounters>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) {
    info!(interval_secs = interval.as_secs(), "traffic summary logger started");
    loop {
        tokio::select! {
            _ = tokio::time::sleep(interval) => {
                let summary = counters.snapshot();
                info!(
                    page_views = summary.page_views,
                    chart_views = summary.total_chart_views(),
                    snippets = summary.total_snippets(),
                    "traffic summary"
                );
            }
            _ = shutdown.changed() => {
                info!("traffic summary logger stopped");
                break;
            }
        }
    }
}

// ── Tests ───────────────────────────────────────────────────────────────
