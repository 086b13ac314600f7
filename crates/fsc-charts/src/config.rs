//! Chart configuration — the renderer's input.
//!
//! A [`ChartConfig`] is the fully resolved description of one figure:
//! which kind to draw, which series with which values, how to format
//! them, and the attribution lines. Builders produce it, the SVG
//! renderer and the data table consume it, and the API serializes it
//! as-is.

use serde::Serialize;

use fsc_core::{ChartId, ChartKind};

/// Fully resolved configuration for one rendered figure.
#[derive(Debug, Clone, Serialize)]
pub struct ChartConfig {
    pub chart_id: ChartId,
    pub kind: ChartKind,
    pub title: String,
    /// Extra line describing the active filter or view, when one is on.
    pub subtitle: Option<String>,
    /// Unit of the plotted values, e.g. "EUR billion".
    pub unit: String,
    pub value_format: ValueFormat,
    /// Common axis labels, one per slot.
    pub labels: Vec<String>,
    pub series: Vec<ChartSeries>,
    /// Stack multi-series bars instead of grouping them.
    pub stacked: bool,
    pub as_of: String,
    pub source_name: String,
    pub source_url: String,
}

/// One series resolved for drawing, values aligned with the config's
/// labels.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<f64>,
}

/// How values are rendered in tables, tooltips, and axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValueFormat {
    /// Whole numbers with thousands grouping: `23 900`.
    Integer,
    /// One decimal place: `3.4`.
    OneDecimal,
    /// One decimal place with a percent sign: `25.1%`.
    Percent,
}

impl ValueFormat {
    pub fn format(&self, value: f64) -> String {
        match self {
            ValueFormat::Integer => group_thousands(value.round() as i64),
            ValueFormat::OneDecimal => format!("{value:.1}"),
            ValueFormat::Percent => format!("{value:.1}%"),
        }
    }
}

/// Group an integer's digits with spaces: `23900` → `23 900`.
fn group_thousands(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    let offset = digits.len() % 3;
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

impl ChartConfig {
    /// Largest plotted value across all series, considering stacking.
    /// Floored at zero so axes keep the baseline.
    pub fn max_value(&self) -> f64 {
        if self.stacked {
            (0..self.labels.len())
                .map(|i| {
                    self.series
                        .iter()
                        .map(|s| s.values.get(i).copied().unwrap_or(0.0))
                        .sum::<f64>()
                })
                .fold(0.0, f64::max)
        } else {
            self.series
                .iter()
                .flat_map(|s| s.values.iter().copied())
                .fold(0.0, f64::max)
        }
    }

    /// Smallest plotted value across all series, capped at zero. Only
    /// charts with negative values (sentiment balance) go below.
    pub fn min_value(&self) -> f64 {
        self.series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .fold(0.0, f64::min)
    }
}
