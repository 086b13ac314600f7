//! Dataset types shared across the dashboard.
//!
//! A [`Dataset`] is one chart's worth of figures: a handful of named
//! series over a common label axis (years, or survey rounds). Values
//! are plain `f64`; units live on the series so charts that switch
//! between views (valuation vs. count) can carry both.

use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};

/// Key identifying a dataset in the store. Matches the chart id of the
/// chart that renders it.
pub use fsc_core::DatasetKey;

// ── Dataset ────────────────────────────────────────────────────────

/// A static, pre-aggregated dataset backing one chart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dataset {
    pub key: DatasetKey,
    /// Human-readable title shown above the chart.
    pub title: String,
    /// Date the figures were last revised (ISO `YYYY-MM-DD`).
    pub as_of: String,
    /// Attribution line rendered under the chart.
    pub source_name: String,
    pub source_url: String,
    pub series: Vec<Series>,
}

/// One named series of values over the dataset's label axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Series {
    pub name: String,
    /// Unit of the values, e.g. "EUR billion" or "persons".
    pub unit: String,
    pub points: Vec<SeriesPoint>,
}

/// A single labelled value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesPoint {
    /// Axis label, e.g. "2023" or "2024 H1".
    pub label: String,
    pub value: f64,
}

impl Dataset {
    /// Look up a series by name.
    pub fn series(&self, name: &str) -> Option<&Series> {
        self.series.iter().find(|s| s.name == name)
    }

    /// Labels of the common axis, taken from the first series.
    pub fn labels(&self) -> Vec<&str> {
        self.series
            .first()
            .map(|s| s.points.iter().map(|p| p.label.as_str()).collect())
            .unwrap_or_default()
    }

    /// Check the structural invariants: at least one non-empty series,
    /// identical label sequences across series, and finite values.
    pub fn validate(&self) -> DataResult<()> {
        if self.key.is_empty() {
            return Err(DataError::Invalid("empty dataset key".to_string()));
        }
        let first = self
            .series
            .first()
            .ok_or_else(|| DataError::Invalid(format!("{}: no series", self.key)))?;
        if first.points.is_empty() {
            return Err(DataError::Invalid(format!(
                "{}: series {:?} has no points",
                self.key, first.name
            )));
        }
        let labels: Vec<&str> = first.points.iter().map(|p| p.label.as_str()).collect();
        for series in &self.series {
            let these: Vec<&str> = series.points.iter().map(|p| p.label.as_str()).collect();
            if these != labels {
                return Err(DataError::Invalid(format!(
                    "{}: series {:?} labels diverge from {:?}",
                    self.key, series.name, first.name
                )));
            }
            for point in &series.points {
                if !point.value.is_finite() {
                    return Err(DataError::Invalid(format!(
                        "{}: non-finite value at {:?} in series {:?}",
                        self.key, point.label, series.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Series {
    /// Largest value in the series, floored at 0.0 so chart axes always
    /// include the baseline.
    pub fn max_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::max)
    }

    /// Smallest value in the series, capped at 0.0 for the same reason.
    /// Only negative values (sentiment balance) pull this below zero.
    pub fn min_value(&self) -> f64 {
        self.points.iter().map(|p| p.value).fold(0.0, f64::min)
    }
}
