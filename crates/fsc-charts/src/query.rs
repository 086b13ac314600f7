//! Chart query — the filter/view selection carried in URLs.

use serde::Deserialize;

use fsc_core::EmbedOptions;

/// Filter and view selection for one chart render.
///
/// Extracted straight from query parameters; values are raw strings
/// because the accepted vocabulary is chart-specific. Builders match
/// known values and silently fall back to the chart's default on
/// anything else, so stale or hand-edited embed URLs keep rendering.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ChartQuery {
    pub filter: Option<String>,
    pub view: Option<String>,
}

impl ChartQuery {
    pub fn new(filter: Option<&str>, view: Option<&str>) -> Self {
        Self {
            filter: filter.map(str::to_string),
            view: view.map(str::to_string),
        }
    }

    /// The selection an embed's options carry.
    pub fn from_options(options: &EmbedOptions) -> Self {
        Self {
            filter: options.filter.clone(),
            view: options.view.clone(),
        }
    }

    /// Resolve the raw filter against a chart's vocabulary. `allowed`
    /// lists the accepted values with the default first; an empty list
    /// means the chart has no filter control.
    pub fn resolve_filter<'a>(&self, allowed: &[&'a str]) -> Option<&'a str> {
        resolve(self.filter.as_deref(), allowed)
    }

    /// Resolve the raw view the same way.
    pub fn resolve_view<'a>(&self, allowed: &[&'a str]) -> Option<&'a str> {
        resolve(self.view.as_deref(), allowed)
    }
}

fn resolve<'a>(raw: Option<&str>, allowed: &[&'a str]) -> Option<&'a str> {
    let default = allowed.first().copied()?;
    match raw {
        Some(value) => Some(
            allowed
                .iter()
                .copied()
                .find(|a| *a == value)
                .unwrap_or(default),
        ),
        None => Some(default),
    }
}
