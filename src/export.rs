//! CSV export of filtered or aggregated frames (the download path).
//! Output is comma-delimited UTF-8 with a header row and decimal points.

use polars::prelude::*;
use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn write_csv<W: Write>(df: &DataFrame, writer: &mut W) -> Result<(), ExportError> {
    let mut df = df.clone();
    CsvWriter::new(writer).include_header(true).finish(&mut df)?;
    Ok(())
}

/// Export to an in-memory buffer, for download handlers.
pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
    let mut buf = Vec::new();
    write_csv(df, &mut buf)?;
    Ok(buf)
}

pub fn write_csv_file(df: &DataFrame, path: &Path) -> Result<(), ExportError> {
    let mut file = fs::File::create(path)?;
    write_csv(df, &mut file)
}
