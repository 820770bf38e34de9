//! Raw-to-cleaned pipeline: deduplication, header repair, numeric
//! normalization and cleaned CSV output.

use crate::config::DataPaths;
use crate::data::columns::{AVG_STAY, AVG_STAY_RAW, NUMERIC_COLUMNS};
use crate::data::normalize::normalize_numeric_columns;
use crate::data::DatasetKey;
use polars::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    Csv(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("No raw dataset could be cleaned under {0}")]
    NoSources(String),
}

/// Clean every known raw dataset and write the `*_cleaned.csv` files.
///
/// A missing raw file is reported and skipped so the other datasets still
/// go through; only a fully empty raw directory is an error.
pub fn clean_datasets(paths: &DataPaths) -> Result<HashMap<DatasetKey, DataFrame>, CleanError> {
    fs::create_dir_all(&paths.cleaned_dir)?;

    let mut cleaned = HashMap::new();
    for key in DatasetKey::ALL {
        let raw_path = paths.raw_dir.join(key.raw_filename());
        if !raw_path.exists() {
            warn!(dataset = %key, path = %raw_path.display(), "raw source file missing, skipping");
            continue;
        }

        info!(dataset = %key, "cleaning raw dataset");
        let df = clean_one(&raw_path)?;

        let out_path = paths.cleaned_dir.join(key.cleaned_filename());
        write_cleaned(&df, &out_path)?;
        info!(dataset = %key, rows = df.height(), path = %out_path.display(), "cleaned dataset written");

        cleaned.insert(key, df);
    }

    if cleaned.is_empty() {
        return Err(CleanError::NoSources(paths.raw_dir.display().to_string()));
    }
    Ok(cleaned)
}

fn clean_one(path: &Path) -> Result<DataFrame, CleanError> {
    // Read every column as text so locale formatting survives untouched
    // until the normalizer sees it.
    let mut df = LazyCsvReader::new(path.to_string_lossy().as_ref())
        .with_infer_schema_length(Some(0))
        .with_ignore_errors(true)
        .finish()?
        .collect()?;

    // Exactly-identical rows are repeated ingestion artifacts; drop them
    // before any value is rewritten.
    let before = df.height();
    df = df.unique_stable(None, UniqueKeepStrategy::First, None)?;
    if df.height() < before {
        info!(removed = before - df.height(), "dropped duplicate rows");
    }

    rename_stay_column(&mut df)?;

    let tally = normalize_numeric_columns(&mut df, &NUMERIC_COLUMNS)?;
    tally.log_missing();

    Ok(df)
}

/// The raw headers misspell the stay-duration column; alias it to the
/// canonical spelling so one identifier works everywhere downstream.
pub(crate) fn rename_stay_column(df: &mut DataFrame) -> Result<(), PolarsError> {
    let has_raw = df
        .get_column_names()
        .iter()
        .any(|c| c.as_str() == AVG_STAY_RAW);
    if has_raw {
        df.rename(AVG_STAY_RAW, AVG_STAY.into())?;
    }
    Ok(())
}

fn write_cleaned(df: &DataFrame, path: &Path) -> Result<(), CleanError> {
    let mut file = fs::File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df.clone())?;
    Ok(())
}
