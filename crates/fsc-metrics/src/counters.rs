//! counters — per-chart view counters shared across HTTP handlers.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Which surface served the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    /// Full dashboard chart page.
    Page,
    /// Bare embed document rendered inside an iframe.
    Embed,
    /// JSON API response.
    Api,
}

#[derive(Debug, Default)]
struct ChartCounters {
    page: AtomicU64,
    embed: AtomicU64,
    api: AtomicU64,
    snippets: AtomicU64,
}

/// Process-wide traffic counters.
///
/// The chart set is fixed at startup, so the map is built once and never
/// mutated; all updates go through the interior atomics. Records against
/// chart ids that were never registered are dropped.
#[derive(Debug)]
pub struct ViewCounters {
    page_views: AtomicU64,
    charts: HashMap<&'static str, ChartCounters>,
}

impl ViewCounters {
    /// Creates counters for the given chart ids, all starting at zero.
    pub fn new(chart_ids: &[&'static str]) -> Self {
        let charts = chart_ids
            .iter()
            .map(|id| (*id, ChartCounters::default()))
            .collect();
        Self {
            page_views: AtomicU64::new(0),
            charts,
        }
    }

    /// Records a dashboard page view (overview or chart page).
    pub fn record_page_view(&self) {
        self.page_views.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one chart render on the given surface.
    pub fn record_chart_view(&self, chart_id: &str, surface: Surface) {
        let Some(counters) = self.charts.get(chart_id) else {
            return;
        };
        let counter = match surface {
            Surface::Page => &counters.page,
            Surface::Embed => &counters.embed,
            Surface::Api => &counters.api,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Records one embed snippet generated for the given chart.
    pub fn record_snippet(&self, chart_id: &str) {
        if let Some(counters) = self.charts.get(chart_id) {
            counters.snippets.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Takes a consistent-enough snapshot of all counters, sorted by
    /// chart id so exposition output is stable.
    pub fn snapshot(&self) -> MetricsSummary {
        let mut charts: Vec<ChartViewSnapshot> = self
            .charts
            .iter()
            .map(|(id, c)| ChartViewSnapshot {
                chart_id: id,
                page: c.page.load(Ordering::Relaxed),
                embed: c.embed.load(Ordering::Relaxed),
                api: c.api.load(Ordering::Relaxed),
                snippets: c.snippets.load(Ordering::Relaxed),
            })
            .collect();
        charts.sort_by(|a, b| a.chart_id.cmp(b.chart_id));
        MetricsSummary {
            page_views: self.page_views.load(Ordering::Relaxed),
            charts,
        }
    }
}

/// Counter values for one chart at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartViewSnapshot {
    pub chart_id: &'static str,
    pub page: u64,
    pub embed: u64,
    pub api: u64,
    pub snippets: u64,
}

/// All counter values at snapshot time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsSummary {
    pub page_views: u64,
    pub charts: Vec<ChartViewSnapshot>,
}

impl MetricsSummary {
    /// Chart renders summed over every chart and surface.
    pub fn total_chart_views(&self) -> u64 {
        self.charts
            .iter()
            .map(|c| c.page + c.embed + c.api)
            .sum()
    }

    /// Embed snippets summed over every chart.
    pub fn total_snippets(&self) -> u64 {
        self.charts.iter().map(|c| c.snippets).sum()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn counters() -> ViewCounters {
        ViewCounters::new(&["revenue", "firms", "unicorns"])
    }

    #[test]
    fn starts_at_zero() {
        let summary = counters().snapshot();
        assert_eq!(summary.page_views, 0);
        assert_eq!(summary.total_chart_views(), 0);
        assert_eq!(summary.total_snippets(), 0);
        assert_eq!(summary.charts.len(), 3);
    }

    #[test]
    fn snapshot_sorted_by_chart_id() {
        let summary = counters().snapshot();
        let ids: Vec<&str> = summary.charts.iter().map(|c| c.chart_id).collect();
        assert_eq!(ids, vec!["firms", "revenue", "unicorns"]);
    }

    #[test]
    fn records_by_surface() {
        let counters = counters();
        counters.record_chart_view("revenue", Surface::Page);
        counters.record_chart_view("revenue", Surface::Embed);
        counters.record_chart_view("revenue", Surface::Embed);
        counters.record_chart_view("firms", Surface::Api);

        let summary = counters.snapshot();
        let revenue = summary
            .charts
            .iter()
            .find(|c| c.chart_id == "revenue")
            .unwrap();
        assert_eq!(revenue.page, 1);
        assert_eq!(revenue.embed, 2);
        assert_eq!(revenue.api, 0);
        let firms = summary.charts.iter().find(|c| c.chart_id == "firms").unwrap();
        assert_eq!(firms.api, 1);
        assert_eq!(summary.total_chart_views(), 4);
    }

    #[test]
    fn unknown_chart_id_dropped() {
        let counters = counters();
        counters.record_chart_view("nonexistent", Surface::Page);
        counters.record_snippet("nonexistent");
        let summary = counters.snapshot();
        assert_eq!(summary.total_chart_views(), 0);
        assert_eq!(summary.total_snippets(), 0);
    }

    #[test]
    fn page_views_and_snippets_accumulate() {
        let counters = counters();
        counters.record_page_view();
        counters.record_page_view();
        counters.record_snippet("unicorns");
        let summary = counters.snapshot();
        assert_eq!(summary.page_views, 2);
        assert_eq!(summary.total_snippets(), 1);
    }

    #[test]
    fn concurrent_records_all_counted() {
        use std::sync::Arc;

        let counters = Arc::new(counters());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let counters = Arc::clone(&counters);
            handles.push(std::thread::spawn(move || {
                for _ in 0..100 {
                    counters.record_chart_view("revenue", Surface::Embed);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        let summary = counters.snapshot();
        let revenue = summary
            .charts
            .iter()
            .find(|c| c.chart_id == "revenue")
            .unwrap();
        assert_eq!(revenue.embed, 800);
    }
}
