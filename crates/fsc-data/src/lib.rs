//! fsc-data — embedded ecosystem datasets and the dataset store.
//!
//! Every chart on the dashboard is rendered from a static dataset that
//! ships inside the binary as JSON. The [`DatasetStore`] parses and
//! validates those payloads once at startup; after that the data is
//! immutable and shared read-only across handlers.

pub mod error;
pub mod store;
pub mod types;

pub use error::{DataError, DataResult};
pub use store::DatasetStore;
pub use types::{Dataset, Series, SeriesPoint};
