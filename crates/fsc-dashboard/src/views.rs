//! View types for dashboard template rendering.
//!
//! These types are purpose-built for Askama templates: they carry
//! pre-formatted strings and computed fields so templates stay simple.
//! Builders live here too; handlers only wire extraction to builders.

use serde::Deserialize;

use fsc_charts::config::ChartConfig;
use fsc_charts::error::ChartError;
use fsc_charts::query::ChartQuery;
use fsc_charts::registry::{self, ChartDescriptor};
use fsc_charts::svg;
use fsc_core::{EmbedOptions, Theme, parse_flag};
use fsc_data::DatasetStore;

// ── Embed query ─────────────────────────────────────────────────

/// Raw query parameters accepted on the embed route.
///
/// Everything is an optional string on the wire; [`EmbedParams::to_options`]
/// resolves them with the documented fallbacks, so malformed values never
/// break an embed that is already pasted into someone's page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct EmbedParams {
    pub filter: Option<String>,
    pub view: Option<String>,
    #[serde(rename = "showTitle")]
    pub show_title: Option<String>,
    #[serde(rename = "showSource")]
    pub show_source: Option<String>,
    pub theme: Option<String>,
    pub compact: Option<String>,
}

impl EmbedParams {
    /// Resolve raw strings into embed options. Flags accept only the
    /// literal `0`/`1`; unknown flag or theme values fall back to the
    /// option's default.
    pub fn to_options(&self) -> EmbedOptions {
        let defaults = EmbedOptions::default();
        EmbedOptions {
            filter: self.filter.clone(),
            view: self.view.clone(),
            show_title: self
                .show_title
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(defaults.show_title),
            show_source: self
                .show_source
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(defaults.show_source),
            theme: self.theme.as_deref().and_then(|t| t.parse().ok()),
            compact: self
                .compact
                .as_deref()
                .and_then(parse_flag)
                .unwrap_or(defaults.compact),
        }
    }
}

// ── Overview cards ──────────────────────────────────────────────

pub struct ChartCard {
    pub chart_id: String,
    pub title: String,
    pub href: String,
    pub svg: String,
    pub unit: String,
    pub as_of_display: String,
}

/// Build one card per registered chart, in display order. A chart whose
/// dataset fails to resolve is skipped rather than taking down the page.
pub fn build_chart_cards(store: &DatasetStore) -> Vec<ChartCard> {
    registry::CHARTS
        .iter()
        .filter_map(|descriptor| {
            let config = registry::build(store, descriptor.chart_id, &ChartQuery::default()).ok()?;
            Some(ChartCard {
                chart_id: descriptor.chart_id.to_string(),
                title: config.title.clone(),
                href: chart_href(descriptor.chart_id, None, None),
                svg: svg::render(&config),
                unit: config.unit.clone(),
                as_of_display: format_as_of(&config.as_of),
            })
        })
        .collect()
}

// ── Headline stats ──────────────────────────────────────────────

pub struct StatCard {
    pub label: &'static str,
    pub value: String,
    pub unit: String,
    /// Period the figure covers, the dataset's final label.
    pub period: String,
    pub href: String,
}

/// Charts whose latest totals headline the overview, with the view
/// that yields the headline number.
const HEADLINES: &[(&str, Option<&str>, &str)] = &[
    ("revenue", None, "Revenue"),
    ("employees", None, "Employees"),
    ("firms", None, "Active firms"),
    ("unicorns", Some("count"), "Unicorns"),
];

/// Build the overview's headline strip: the most recent total of each
/// curated series. A stat whose chart fails to build is skipped, same
/// as its card.
pub fn build_stat_cards(store: &DatasetStore) -> Vec<StatCard> {
    HEADLINES
        .iter()
        .filter_map(|&(chart_id, view, label)| {
            let config = registry::build(store, chart_id, &ChartQuery::new(None, view)).ok()?;
            let total = latest_total(&config)?;
            Some(StatCard {
                label,
                value: config.value_format.format(total),
                unit: config.unit.clone(),
                period: config.labels.last()?.clone(),
                href: chart_href(chart_id, None, view),
            })
        })
        .collect()
}

/// Sum of the final slot across series, the single-number summary of
/// the chart's most recent period.
fn latest_total(config: &ChartConfig) -> Option<f64> {
    let last = config.labels.len().checked_sub(1)?;
    config
        .series
        .iter()
        .map(|s| s.values.get(last).copied())
        .sum()
}

// ── Chart page ──────────────────────────────────────────────────

pub struct ControlView {
    pub label: String,
    pub href: String,
    pub active: bool,
}

pub struct TableView {
    /// First column header plus one header per series.
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

pub struct TableRow {
    pub label: String,
    pub cells: Vec<String>,
}

pub struct EmbedPanelView {
    pub url: String,
    pub snippet: String,
}

pub struct ChartView {
    pub chart_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub unit: String,
    pub svg: String,
    pub filter_controls: Vec<ControlView>,
    pub view_controls: Vec<ControlView>,
    pub table: TableView,
    pub as_of_display: String,
    pub source_name: String,
    pub source_url: String,
    /// Absent only when snippet generation fails (misconfigured base URL).
    pub embed: Option<EmbedPanelView>,
}

pub fn build_chart_view(
    store: &DatasetStore,
    descriptor: &ChartDescriptor,
    query: &ChartQuery,
    base_url: &str,
) -> Result<ChartView, ChartError> {
    let config = registry::build(store, descriptor.chart_id, query)?;

    let resolved_filter = query.resolve_filter(descriptor.filters);
    let resolved_view = query.resolve_view(descriptor.views);
    let default_filter = descriptor.filters.first().copied();
    let default_view = descriptor.views.first().copied();

    // URLs carry only non-default selections.
    let filter_param = resolved_filter.filter(|f| Some(*f) != default_filter);
    let view_param = resolved_view.filter(|v| Some(*v) != default_view);

    let filter_controls = descriptor
        .filters
        .iter()
        .map(|value| {
            let param = (Some(*value) != default_filter).then_some(*value);
            ControlView {
                label: control_label(value),
                href: chart_href(descriptor.chart_id, param, view_param),
                active: resolved_filter == Some(*value),
            }
        })
        .collect();

    let view_controls = descriptor
        .views
        .iter()
        .map(|value| {
            let param = (Some(*value) != default_view).then_some(*value);
            ControlView {
                label: control_label(value),
                href: chart_href(descriptor.chart_id, filter_param, param),
                active: resolved_view == Some(*value),
            }
        })
        .collect();

    let options = EmbedOptions {
        filter: filter_param.map(str::to_string),
        view: view_param.map(str::to_string),
        ..EmbedOptions::default()
    };
    let embed = fsc_embed::generate(base_url, &config.chart_id, &config.title, &options)
        .ok()
        .map(|snippet| EmbedPanelView {
            url: snippet.url,
            snippet: snippet.html,
        });

    Ok(ChartView {
        chart_id: descriptor.chart_id.to_string(),
        title: config.title.clone(),
        subtitle: config.subtitle.clone(),
        unit: config.unit.clone(),
        svg: svg::render(&config),
        filter_controls,
        view_controls,
        table: build_table(&config),
        as_of_display: format_as_of(&config.as_of),
        source_name: config.source_name.clone(),
        source_url: config.source_url.clone(),
        embed,
    })
}

pub fn build_table(config: &ChartConfig) -> TableView {
    let mut header = vec!["Period".to_string()];
    header.extend(config.series.iter().map(|s| s.name.clone()));

    let rows = config
        .labels
        .iter()
        .enumerate()
        .map(|(i, label)| TableRow {
            label: label.clone(),
            cells: config
                .series
                .iter()
                .map(|s| {
                    s.values
                        .get(i)
                        .map(|v| config.value_format.format(*v))
                        .unwrap_or_default()
                })
                .collect(),
        })
        .collect();

    TableView { header, rows }
}

// ── Embed page ──────────────────────────────────────────────────

pub struct EmbedView {
    pub chart_id: String,
    pub title: String,
    pub subtitle: Option<String>,
    pub svg: String,
    pub show_title: bool,
    pub show_source: bool,
    pub compact: bool,
    pub theme_attr: &'static str,
    pub source_name: String,
    pub source_url: String,
    pub as_of_display: String,
    pub reporter_script: String,
}

pub fn build_embed_view(
    store: &DatasetStore,
    descriptor: &ChartDescriptor,
    options: &EmbedOptions,
    default_theme: Theme,
) -> Result<EmbedView, ChartError> {
    let query = ChartQuery::from_options(options);
    let config = registry::build(store, descriptor.chart_id, &query)?;
    let theme = options.theme.unwrap_or(default_theme);

    Ok(EmbedView {
        chart_id: descriptor.chart_id.to_string(),
        title: config.title.clone(),
        subtitle: config.subtitle.clone(),
        svg: svg::render(&config),
        show_title: options.show_title,
        show_source: options.show_source,
        compact: options.compact,
        theme_attr: theme.as_str(),
        source_name: config.source_name.clone(),
        source_url: config.source_url.clone(),
        as_of_display: format_as_of(&config.as_of),
        reporter_script: fsc_embed::reporter_js(&config.chart_id),
    })
}

// ── Format Helpers ──────────────────────────────────────────────

/// Human label for a control value: `female-share` becomes `Female share`.
pub fn control_label(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for (i, part) in value.split('-').enumerate() {
        if i > 0 {
            out.push(' ');
            out.push_str(part);
            continue;
        }
        let mut chars = part.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

/// Format a dataset's ISO date for display. Anything unparseable is
/// shown as-is rather than dropped.
pub fn format_as_of(date: &str) -> String {
    chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%-d %B %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

fn chart_href(chart_id: &str, filter: Option<&str>, view: Option<&str>) -> String {
    let mut params: Vec<String> = Vec::new();
    if let Some(filter) = filter {
        params.push(format!("filter={filter}"));
    }
    if let Some(view) = view {
        params.push(format!("view={view}"));
    }
    if params.is_empty() {
        format!("/charts/{chart_id}")
    } else {
        format!("/charts/{chart_id}?{}", params.join("&"))
    }
}
