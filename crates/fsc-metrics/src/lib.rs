//! fsc-metrics — traffic counters for the dashboard and embed surfaces.
//!
//! Counters are plain atomics behind an `Arc`, registered once at startup
//! from the static chart registry and bumped by the HTTP handlers. The
//! crate renders them as Prometheus text exposition and runs a periodic
//! summary logger so operators get traffic totals without scraping.

pub mod counters;
pub mod prometheus;
pub mod summary;

pub use counters::{ChartViewSnapshot, MetricsSummary, Surface, ViewCounters};
pub use prometheus::render_prometheus;
pub use summary::run_summary_logger;
