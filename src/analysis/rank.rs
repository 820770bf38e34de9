//! Top-N / bottom-N selection and small descriptive helpers.

use crate::analysis::aggregate::EngineError;
use crate::analysis::frame::float_values;
use polars::prelude::*;
use std::cmp::Ordering;

/// The n rows with the largest (or, with `ascending`, smallest) value in
/// `field`. Rows with a missing ranking value are excluded.
///
/// Selection is built on one canonical stable descending ranking, ties
/// keeping original row order; the ascending view is its exact reverse, so
/// `top_n(n)` and `bottom_n(len - n)` always partition the ranked rows.
pub fn top_n(
    df: &DataFrame,
    field: &str,
    n: usize,
    ascending: bool,
) -> Result<DataFrame, EngineError> {
    let values = float_values(df, field)?;

    let mut ranked: Vec<(usize, f64)> = values
        .iter()
        .enumerate()
        .filter_map(|(i, v)| v.map(|v| (i, v)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    if ascending {
        ranked.reverse();
    }
    ranked.truncate(n);

    let indices: Vec<IdxSize> = ranked.into_iter().map(|(i, _)| i as IdxSize).collect();
    let idx = IdxCa::from_vec("idx".into(), indices);
    Ok(df.take(&idx)?)
}

/// The n rows with the smallest value in `field`.
pub fn bottom_n(df: &DataFrame, field: &str, n: usize) -> Result<DataFrame, EngineError> {
    top_n(df, field, n, true)
}

/// Arithmetic mean; `None` over an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Median; `None` over an empty slice.
pub fn median(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n == 0 {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
    if n % 2 == 0 {
        Some((sorted[n / 2 - 1] + sorted[n / 2]) / 2.0)
    } else {
        Some(sorted[n / 2])
    }
}
