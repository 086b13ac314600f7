//! DatasetStore — parsed, validated datasets keyed by chart id.
//!
//! Datasets ship inside the binary via `include_str!`. An optional data
//! directory (configured under `[data] dir` in fsc.toml) overrides
//! individual datasets by file name, which is how revised figures are
//! deployed without a rebuild.

use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use crate::error::{DataError, DataResult};
use crate::types::{Dataset, DatasetKey};

/// Dataset payloads compiled into the binary.
const EMBEDDED: &[(&str, &str)] = &[
    ("revenue", include_str!("../data/revenue.json")),
    ("employees", include_str!("../data/employees.json")),
    ("firms", include_str!("../data/firms.json")),
    ("rd-investment", include_str!("../data/rd-investment.json")),
    ("workforce-gender", include_str!("../data/workforce-gender.json")),
    (
        "workforce-immigration",
        include_str!("../data/workforce-immigration.json"),
    ),
    ("sentiment", include_str!("../data/sentiment.json")),
    ("unicorns", include_str!("../data/unicorns.json")),
];

/// Immutable collection of datasets, loaded once at startup and shared
/// read-only across handlers.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    datasets: HashMap<DatasetKey, Dataset>,
}

impl DatasetStore {
    /// Load the datasets compiled into the binary.
    pub fn embedded() -> DataResult<Self> {
        let mut datasets = HashMap::new();
        for (key, raw) in EMBEDDED {
            let dataset = parse_dataset(key, raw)?;
            datasets.insert(dataset.key.clone(), dataset);
        }
        debug!(count = datasets.len(), "embedded datasets loaded");
        Ok(Self { datasets })
    }

    /// Load the embedded datasets, then replace any whose key matches a
    /// `<key>.json` file in `dir`. Files with new keys become additional
    /// datasets; non-JSON files are skipped.
    pub fn with_overrides(dir: &Path) -> DataResult<Self> {
        let mut store = Self::embedded()?;
        let entries = std::fs::read_dir(dir)
            .map_err(|e| DataError::Read(format!("{}: {e}", dir.display())))?;
        for entry in entries {
            let entry = entry.map_err(|e| DataError::Read(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let key = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| DataError::Read(format!("{}: {e}", path.display())))?;
            let dataset = parse_dataset(&key, &raw)?;
            debug!(%key, path = %path.display(), "dataset overridden from file");
            store.datasets.insert(dataset.key.clone(), dataset);
        }
        Ok(store)
    }

    /// Get a dataset by key.
    pub fn get(&self, key: &str) -> DataResult<&Dataset> {
        self.datasets
            .get(key)
            .ok_or_else(|| DataError::Unknown(key.to_string()))
    }

    /// Keys of all loaded datasets, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.datasets.keys().map(|k| k.as_str()).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.datasets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty()
    }
}

/// Parse one payload and check it declares the key it was filed under.
fn parse_dataset(key: &str, raw: &str) -> DataResult<Dataset> {
    let dataset: Dataset =
        serde_json::from_str(raw).map_err(|e| DataError::Parse(format!("{key}: {e}")))?;
    if dataset.key != key {
        return Err(DataError::Invalid(format!(
            "{key}: payload declares key {:?}",
            dataset.key
        )));
    }
    dataset.validate()?;
    Ok(dataset)
}
