//! Column access helpers shared by the engine and the views.

use polars::prelude::*;

/// Text values of a column, independent of its physical dtype.
pub fn text_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<String>>> {
    let col = df.column(column)?;
    Ok((0..col.len())
        .map(|i| match col.get(i) {
            Ok(value) if !value.is_null() => {
                Some(value.to_string().trim_matches('"').to_string())
            }
            _ => None,
        })
        .collect())
}

/// Float values of a column, cast through f64; nulls stay missing.
pub fn float_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<f64>>> {
    let casted = df.column(column)?.cast(&DataType::Float64)?;
    Ok(casted.f64()?.into_iter().collect())
}

/// Sorted unique non-null text values of a column.
pub fn unique_text(df: &DataFrame, column: &str) -> Vec<String> {
    df.column(column)
        .ok()
        .and_then(|col| col.unique().ok())
        .map(|unique| {
            let series = unique.as_materialized_series();
            let mut values: Vec<String> = (0..series.len())
                .filter_map(|i| {
                    let val = series.get(i).ok()?;
                    if val.is_null() {
                        None
                    } else {
                        Some(val.to_string().trim_matches('"').to_string())
                    }
                })
                .collect();
            values.sort();
            values
        })
        .unwrap_or_default()
}

/// Smallest and largest month present in the frame; `None` when empty.
/// Canonical `YYYY-MM` strings order lexicographically.
pub fn month_bounds(df: &DataFrame, column: &str) -> Option<(String, String)> {
    let months = unique_text(df, column);
    Some((months.first()?.clone(), months.last()?.clone()))
}

/// Rows reordered by ascending text value of one column (stable).
pub fn sort_by_text(df: &DataFrame, column: &str) -> PolarsResult<DataFrame> {
    let values = text_values(df, column)?;
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|a, b| values[*a].cmp(&values[*b]));

    let indices: Vec<IdxSize> = order.into_iter().map(|i| i as IdxSize).collect();
    let idx = IdxCa::from_vec("idx".into(), indices);
    df.take(&idx)
}
