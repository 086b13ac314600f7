//! fsc-charts — chart registry, config builders, and the SVG renderer.
//!
//! The registry maps each chart id to its dataset key, its control
//! vocabulary (filters and view modes), and a builder that turns the
//! dataset plus a query into a [`ChartConfig`]. The renderer turns a
//! config into a themable inline SVG figure. Unknown filter and view
//! values fall back to the chart's default so stale third-party embed
//! URLs keep rendering.

pub mod builders;
pub mod config;
pub mod error;
pub mod query;
pub mod registry;
pub mod svg;

pub use config::{ChartConfig, ChartSeries, ValueFormat};
pub use error::ChartError;
pub use query::ChartQuery;
pub use registry::{ChartDescriptor, build, chart_ids, find};
