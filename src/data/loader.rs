//! Cleaned dataset loading.
//! One load per session; the resulting store is immutable shared state for
//! every dashboard page.

use crate::config::DataPaths;
use crate::data::cleaner::rename_stay_column;
use crate::data::columns::{MONTH, NUMERIC_COLUMNS};
use crate::data::normalize::{canonical_month, normalize_numeric_columns};
use crate::data::DatasetKey;
use polars::prelude::*;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("All source files are missing under {0}")]
    AllSourcesMissing(String),
}

/// Every dataset loaded for a session, keyed by its stable name.
///
/// Accessors hand out shared references only; per-filter work derives new
/// frames instead of mutating the cached tables.
pub struct DatasetStore {
    tables: HashMap<DatasetKey, DataFrame>,
}

impl DatasetStore {
    /// Load every cleaned dataset found under `cleaned_dir`. A missing file
    /// is reported and skipped; all files missing is the one fatal case.
    pub fn load(paths: &DataPaths) -> Result<Self, LoadError> {
        let mut tables = HashMap::new();

        for key in DatasetKey::ALL {
            let path = paths.cleaned_dir.join(key.cleaned_filename());
            if !path.exists() {
                warn!(dataset = %key, path = %path.display(), "cleaned source file missing, skipping");
                continue;
            }

            let df = load_one(&path)?;
            info!(dataset = %key, rows = df.height(), cols = df.width(), "dataset loaded");
            tables.insert(key, df);
        }

        if tables.is_empty() {
            return Err(LoadError::AllSourcesMissing(
                paths.cleaned_dir.display().to_string(),
            ));
        }
        Ok(Self { tables })
    }

    pub fn get(&self, key: DatasetKey) -> Option<&DataFrame> {
        self.tables.get(&key)
    }

    /// Loaded dataset keys, in the fixed declaration order.
    pub fn keys(&self) -> Vec<DatasetKey> {
        DatasetKey::ALL
            .into_iter()
            .filter(|k| self.tables.contains_key(k))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn load_one(path: &Path) -> Result<DataFrame, LoadError> {
    let mut df = LazyCsvReader::new(path.to_string_lossy().as_ref())
        .with_infer_schema_length(Some(10000))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    rename_stay_column(&mut df)?;

    // Cleaned files already carry numbers; re-running the normalizer is a
    // no-op there and repairs files produced by other tools.
    let tally = normalize_numeric_columns(&mut df, &NUMERIC_COLUMNS)?;
    tally.log_missing();

    canonicalize_month_column(&mut df)?;
    Ok(df)
}

fn canonicalize_month_column(df: &mut DataFrame) -> Result<(), PolarsError> {
    if df.column(MONTH).is_err() {
        return Ok(());
    }

    let column = df.column(MONTH)?.clone();
    let months: Vec<Option<String>> = (0..column.len())
        .map(|i| {
            let value = column.get(i).ok()?;
            if value.is_null() {
                None
            } else {
                canonical_month(&value.to_string())
            }
        })
        .collect();

    df.with_column(Column::new(MONTH.into(), months))?;
    Ok(())
}
