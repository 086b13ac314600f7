//! prometheus — text exposition for the traffic counters.

use crate::counters::MetricsSummary;

/// Renders the counter snapshot in Prometheus text exposition format.
///
/// Every registered chart gets a line per surface even when the count is
/// still zero, so scrapes see the full series set from the first poll.
pub fn render_prometheus(summary: &MetricsSummary) -> String {
    let mut out = String::new();

    out.push_str("# HELP fsc_page_views_total Dashboard page views served\n");
    out.push_str("# TYPE fsc_page_views_total counter\n");
    out.push_str(&format!("fsc_page_views_total {}\n", summary.page_views));

    out.push_str("# HELP fsc_chart_views_total Chart renders per chart and surface\n");
    out.push_str("# TYPE fsc_chart_views_total counter\n");
    for chart in &summary.charts {
        for (surface, count) in [
            ("page", chart.page),
            ("embed", chart.embed),
            ("api", chart.api),
        ] {
            out.push_str(&format!(
                "fsc_chart_views_total{{chart=\"{}\",surface=\"{}\"}} {}\n",
                chart.chart_id, surface, count
            ));
        }
    }

    out.push_str("# HELP fsc_embed_snippets_total Embed snippets generated per chart\n");
    out.push_str("# TYPE fsc_embed_snippets_total counter\n");
    for chart in &summary.charts {
        out.push_str(&format!(
            "fsc_embed_snippets_total{{chart=\"{}\"}} {}\n",
            chart.chart_id, chart.snippets
        ));
    }

    out
}

// ── Tests ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counters::{Surface, ViewCounters};

    #[test]
    fn render_empty_keeps_declarations() {
        let summary = MetricsSummary {
            page_views: 0,
            charts: Vec::new(),
        };
        let text = render_prometheus(&summary);
        assert!(text.contains("# HELP fsc_page_views_total"));
        assert!(text.contains("# TYPE fsc_chart_views_total counter"));
        assert!(text.contains("# TYPE fsc_embed_snippets_total counter"));
        assert!(text.contains("fsc_page_views_total 0\n"));
    }

    #[test]
    fn renders_labeled_lines_per_surface() {
        let counters = ViewCounters::new(&["revenue", "sentiment"]);
        counters.record_page_view();
        counters.record_chart_view("revenue", Surface::Page);
        counters.record_chart_view("revenue", Surface::Embed);
        counters.record_chart_view("revenue", Surface::Embed);
        counters.record_snippet("sentiment");

        let text = render_prometheus(&counters.snapshot());
        assert!(text.contains("fsc_page_views_total 1\n"));
        assert!(text.contains("fsc_chart_views_total{chart=\"revenue\",surface=\"page\"} 1\n"));
        assert!(text.contains("fsc_chart_views_total{chart=\"revenue\",surface=\"embed\"} 2\n"));
        assert!(text.contains("fsc_chart_views_total{chart=\"revenue\",surface=\"api\"} 0\n"));
        assert!(text.contains("fsc_embed_snippets_total{chart=\"sentiment\"} 1\n"));
    }

    #[test]
    fn zero_counts_still_exposed() {
        let counters = ViewCounters::new(&["firms"]);
        let text = render_prometheus(&counters.snapshot());
        assert!(text.contains("fsc_chart_views_total{chart=\"firms\",surface=\"page\"} 0\n"));
        assert!(text.contains("fsc_embed_snippets_total{chart=\"firms\"} 0\n"));
    }

    #[test]
    fn exposition_format_compatible() {
        let counters = ViewCounters::new(&["revenue", "firms"]);
        counters.record_chart_view("firms", Surface::Api);

        let text = render_prometheus(&counters.snapshot());
        for line in text.lines() {
            if line.starts_with('#') {
                assert!(line.starts_with("# HELP") || line.starts_with("# TYPE"));
                continue;
            }
            // name{labels} value, or name value for unlabeled series
            let (series, value) = line.rsplit_once(' ').unwrap();
            assert!(value.parse::<u64>().is_ok(), "bad value in line: {line}");
            assert!(series.starts_with("fsc_"), "bad series in line: {line}");
            if let Some(open) = series.find('{') {
                assert!(series.ends_with('}'), "unclosed labels in line: {line}");
                assert!(series[open..].contains('='), "empty labels in line: {line}");
            }
        }
    }
}
