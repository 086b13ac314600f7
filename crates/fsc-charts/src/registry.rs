//! Chart registry — the catalogue of everything the dashboard renders.
//!
//! One static descriptor per chart: its dataset key, figure kind,
//! control vocabulary, and builder. Route handlers, the API, and the
//! CLI all resolve charts through [`find`] and [`build`].

use fsc_data::DatasetStore;

use crate::builders::{self, BuilderFn};
use crate::config::ChartConfig;
use crate::error::ChartError;
use crate::query::ChartQuery;
use fsc_core::ChartKind;

/// Static description of one registered chart.
#[derive(Debug)]
pub struct ChartDescriptor {
    pub chart_id: &'static str,
    pub dataset_key: &'static str,
    pub kind: ChartKind,
    /// Accepted filter values, default first. Empty means the chart has
    /// no filter control.
    pub filters: &'static [&'static str],
    /// Accepted view modes, default first. Empty means no view control.
    pub views: &'static [&'static str],
    pub builder: BuilderFn,
}

/// Every chart the dashboard knows, in display order.
pub const CHARTS: &[ChartDescriptor] = &[
    ChartDescriptor {
        chart_id: "revenue",
        dataset_key: "revenue",
        kind: ChartKind::Bar,
        filters: &["all", "startups", "scaleups"],
        views: &[],
        builder: builders::revenue,
    },
    ChartDescriptor {
        chart_id: "employees",
        dataset_key: "employees",
        kind: ChartKind::Bar,
        filters: &["all", "startups", "scaleups"],
        views: &[],
        builder: builders::employees,
    },
    ChartDescriptor {
        chart_id: "firms",
        dataset_key: "firms",
        kind: ChartKind::Bar,
        filters: &[],
        views: &[],
        builder: builders::firms,
    },
    ChartDescriptor {
        chart_id: "rd-investment",
        dataset_key: "rd-investment",
        kind: ChartKind::Area,
        filters: &[],
        views: &[],
        builder: builders::rd_investment,
    },
    ChartDescriptor {
        chart_id: "workforce-gender",
        dataset_key: "workforce-gender",
        kind: ChartKind::Bar,
        filters: &[],
        views: &["split", "female-share", "male-share"],
        builder: builders::workforce_gender,
    },
    ChartDescriptor {
        chart_id: "workforce-immigration",
        dataset_key: "workforce-immigration",
        kind: ChartKind::Bar,
        filters: &[],
        views: &["split", "international-share"],
        builder: builders::workforce_immigration,
    },
    ChartDescriptor {
        chart_id: "sentiment",
        dataset_key: "sentiment",
        kind: ChartKind::Area,
        filters: &[],
        views: &["index", "balance"],
        builder: builders::sentiment,
    },
    ChartDescriptor {
        chart_id: "unicorns",
        dataset_key: "unicorns",
        kind: ChartKind::Bar,
        filters: &[],
        views: &["valuation", "count"],
        builder: builders::unicorns,
    },
];

/// Look up a chart descriptor by id.
pub fn find(chart_id: &str) -> Option<&'static ChartDescriptor> {
    CHARTS.iter().find(|c| c.chart_id == chart_id)
}

/// All registered chart ids, in display order.
pub fn chart_ids() -> Vec<&'static str> {
    CHARTS.iter().map(|c| c.chart_id).collect()
}

/// Resolve a chart and build its config for the given query.
pub fn build(
    store: &DatasetStore,
    chart_id: &str,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    let descriptor = find(chart_id).ok_or_else(|| ChartError::UnknownChart(chart_id.to_string()))?;
    let dataset = store.get(descriptor.dataset_key)?;
    (descriptor.builder)(descriptor, dataset, query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fsc_core::ChartId;

    #[test]
    fn registry_lists_all_charts_in_display_order() {
        assert_eq!(
            chart_ids(),
            vec![
                "revenue",
                "employees",
                "firms",
                "rd-investment",
                "workforce-gender",
                "workforce-immigration",
                "sentiment",
                "unicorns",
            ]
        );
    }

    #[test]
    fn find_known_and_unknown() {
        assert!(find("sentiment").is_some());
        assert!(find("valuations").is_none());
        assert!(find("Revenue").is_none());
    }

    #[test]
    fn every_chart_id_is_well_formed() {
        for descriptor in CHARTS {
            assert!(
                ChartId::parse(descriptor.chart_id).is_ok(),
                "bad chart id {:?}",
                descriptor.chart_id
            );
        }
    }

    #[test]
    fn every_dataset_key_resolves_in_the_embedded_store() {
        let store = fsc_data::DatasetStore::embedded().unwrap();
        for descriptor in CHARTS {
            assert!(
                store.get(descriptor.dataset_key).is_ok(),
                "missing dataset {:?}",
                descriptor.dataset_key
            );
        }
    }

    #[test]
    fn every_chart_builds_with_default_query() {
        let store = fsc_data::DatasetStore::embedded().unwrap();
        for descriptor in CHARTS {
            let config = build(&store, descriptor.chart_id, &ChartQuery::default())
                .unwrap_or_else(|e| panic!("{} failed: {e}", descriptor.chart_id));
            assert_eq!(config.chart_id.as_str(), descriptor.chart_id);
            assert_eq!(config.kind, descriptor.kind);
            assert!(!config.series.is_empty());
            assert!(!config.labels.is_empty());
            for series in &config.series {
                assert_eq!(series.values.len(), config.labels.len());
            }
        }
    }

    #[test]
    fn every_declared_control_value_builds() {
        let store = fsc_data::DatasetStore::embedded().unwrap();
        for descriptor in CHARTS {
            for filter in descriptor.filters {
                let query = ChartQuery::new(Some(filter), None);
                assert!(build(&store, descriptor.chart_id, &query).is_ok());
            }
            for view in descriptor.views {
                let query = ChartQuery::new(None, Some(view));
                assert!(build(&store, descriptor.chart_id, &query).is_ok());
            }
        }
    }

    #[test]
    fn unknown_chart_is_an_error() {
        let store = fsc_data::DatasetStore::embedded().unwrap();
        assert!(matches!(
            build(&store, "valuations", &ChartQuery::default()),
            Err(ChartError::UnknownChart(_))
        ));
    }
}
