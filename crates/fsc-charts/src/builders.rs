//! Per-chart config builders.
//!
//! Each builder resolves the query against its chart's vocabulary and
//! assembles the series to draw. Unknown filter/view values resolve to
//! the default, never to an error; a missing series in the backing
//! dataset is a data defect and fails loudly.

use fsc_core::ChartId;
use fsc_data::{Dataset, Series};

use crate::config::{ChartConfig, ChartSeries, ValueFormat};
use crate::error::ChartError;
use crate::query::ChartQuery;
use crate::registry::ChartDescriptor;

/// Builder signature the registry dispatches through.
pub type BuilderFn = fn(&ChartDescriptor, &Dataset, &ChartQuery) -> Result<ChartConfig, ChartError>;

// ── Revenue and employees (segment filter) ─────────────────────────

pub fn revenue(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    segment_bars(descriptor, dataset, query, ValueFormat::OneDecimal)
}

pub fn employees(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    segment_bars(descriptor, dataset, query, ValueFormat::Integer)
}

/// Shared shape of the revenue and employees charts: a `Startups` and a
/// `Scaleups` series, stacked for the `all` filter, single otherwise.
fn segment_bars(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
    value_format: ValueFormat,
) -> Result<ChartConfig, ChartError> {
    let mut config = skeleton(descriptor, dataset)?;
    let startups = pick(dataset, "Startups")?;
    let scaleups = pick(dataset, "Scaleups")?;
    config.unit = startups.unit.clone();
    config.value_format = value_format;
    match query.resolve_filter(descriptor.filters) {
        Some("startups") => {
            config.subtitle = Some("Startups only".to_string());
            config.series = vec![chart_series(startups)];
        }
        Some("scaleups") => {
            config.subtitle = Some("Scaleups only".to_string());
            config.series = vec![chart_series(scaleups)];
        }
        _ => {
            config.stacked = true;
            config.series = vec![chart_series(startups), chart_series(scaleups)];
        }
    }
    Ok(config)
}

// ── Firms and R&D (no controls) ────────────────────────────────────

pub fn firms(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    _query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    single_series(descriptor, dataset, "Active firms", ValueFormat::Integer)
}

pub fn rd_investment(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    _query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    single_series(descriptor, dataset, "R&D spending", ValueFormat::Integer)
}

fn single_series(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    name: &str,
    value_format: ValueFormat,
) -> Result<ChartConfig, ChartError> {
    let mut config = skeleton(descriptor, dataset)?;
    let series = pick(dataset, name)?;
    config.unit = series.unit.clone();
    config.value_format = value_format;
    config.series = vec![chart_series(series)];
    Ok(config)
}

// ── Workforce splits (view modes with derived shares) ──────────────

pub fn workforce_gender(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    let mut config = skeleton(descriptor, dataset)?;
    let women = pick(dataset, "Women")?;
    let men = pick(dataset, "Men")?;
    match query.resolve_view(descriptor.views) {
        Some("female-share") => {
            config.subtitle = Some("Share of women".to_string());
            share_view(&mut config, women, &[women, men]);
        }
        Some("male-share") => {
            config.subtitle = Some("Share of men".to_string());
            share_view(&mut config, men, &[women, men]);
        }
        _ => {
            config.unit = women.unit.clone();
            config.value_format = ValueFormat::Integer;
            config.stacked = true;
            config.series = vec![chart_series(women), chart_series(men)];
        }
    }
    Ok(config)
}

pub fn workforce_immigration(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    let mut config = skeleton(descriptor, dataset)?;
    let international = pick(dataset, "International")?;
    let domestic = pick(dataset, "Domestic")?;
    match query.resolve_view(descriptor.views) {
        Some("international-share") => {
            config.subtitle = Some("Share of international employees".to_string());
            share_view(&mut config, international, &[international, domestic]);
        }
        _ => {
            config.unit = international.unit.clone();
            config.value_format = ValueFormat::Integer;
            config.stacked = true;
            config.series = vec![chart_series(international), chart_series(domestic)];
        }
    }
    Ok(config)
}

/// Turn a config into a one-series percent view: `part` over the sum
/// of `whole`, per label slot.
fn share_view(config: &mut ChartConfig, part: &Series, whole: &[&Series]) {
    config.unit = "% of workforce".to_string();
    config.value_format = ValueFormat::Percent;
    config.series = vec![ChartSeries {
        name: part.name.clone(),
        values: share_values(part, whole),
    }];
}

fn share_values(part: &Series, whole: &[&Series]) -> Vec<f64> {
    (0..part.points.len())
        .map(|i| {
            let total: f64 = whole.iter().map(|s| s.points[i].value).sum();
            if total > 0.0 {
                part.points[i].value / total * 100.0
            } else {
                0.0
            }
        })
        .collect()
}

// ── Sentiment barometer ────────────────────────────────────────────

pub fn sentiment(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    let mut config = skeleton(descriptor, dataset)?;
    let (series, subtitle) = match query.resolve_view(descriptor.views) {
        Some("balance") => (
            pick(dataset, "Balance")?,
            "Balance of positive and negative outlooks",
        ),
        _ => (pick(dataset, "Outlook index")?, "Composite outlook index"),
    };
    config.subtitle = Some(subtitle.to_string());
    config.unit = series.unit.clone();
    config.value_format = ValueFormat::Integer;
    config.series = vec![chart_series(series)];
    Ok(config)
}

// ── Unicorns ───────────────────────────────────────────────────────

pub fn unicorns(
    descriptor: &ChartDescriptor,
    dataset: &Dataset,
    query: &ChartQuery,
) -> Result<ChartConfig, ChartError> {
    let mut config = skeleton(descriptor, dataset)?;
    let (series, format, subtitle) = match query.resolve_view(descriptor.views) {
        Some("count") => (
            pick(dataset, "Unicorn count")?,
            ValueFormat::Integer,
            "Number of unicorns",
        ),
        _ => (
            pick(dataset, "Combined valuation")?,
            ValueFormat::OneDecimal,
            "Combined valuation",
        ),
    };
    config.subtitle = Some(subtitle.to_string());
    config.unit = series.unit.clone();
    config.value_format = format;
    config.series = vec![chart_series(series)];
    Ok(config)
}

// ── Shared helpers ─────────────────────────────────────────────────

/// Config skeleton carrying everything that comes straight from the
/// descriptor and dataset; the builder fills series, unit, and format.
fn skeleton(descriptor: &ChartDescriptor, dataset: &Dataset) -> Result<ChartConfig, ChartError> {
    let chart_id = ChartId::parse(descriptor.chart_id)
        .map_err(|_| ChartError::UnknownChart(descriptor.chart_id.to_string()))?;
    Ok(ChartConfig {
        chart_id,
        kind: descriptor.kind,
        title: dataset.title.clone(),
        subtitle: None,
        unit: String::new(),
        value_format: ValueFormat::Integer,
        labels: dataset.labels().iter().map(|l| l.to_string()).collect(),
        series: Vec::new(),
        stacked: false,
        as_of: dataset.as_of.clone(),
        source_name: dataset.source_name.clone(),
        source_url: dataset.source_url.clone(),
    })
}

fn pick<'a>(dataset: &'a Dataset, name: &str) -> Result<&'a Series, ChartError> {
    dataset
        .series(name)
        .ok_or_else(|| ChartError::MissingSeries {
            dataset: dataset.key.clone(),
            name: name.to_string(),
        })
}

fn chart_series(series: &Series) -> ChartSeries {
    ChartSeries {
        name: series.name.clone(),
        values: series.points.iter().map(|p| p.value).collect(),
    }
}
