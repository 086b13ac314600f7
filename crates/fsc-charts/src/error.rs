//! Error types for chart lookup and building.

use thiserror::Error;

use fsc_data::DataError;

/// Errors that can occur while resolving or building a chart.
#[derive(Debug, Error)]
pub enum ChartError {
    #[error("unknown chart: {0}")]
    UnknownChart(String),

    #[error("dataset {dataset} has no series {name:?}")]
    MissingSeries { dataset: String, name: String },

    #[error(transparent)]
    Data(#[from] DataError),
}
