//! Aggregation Engine
//! Generic group-by / summarize shared by all dashboard views.

use crate::analysis::frame::{float_values, text_values};
use polars::prelude::*;
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    #[error("Aggregation needs at least one grouping column")]
    EmptyGroupBy,
}

/// How one metric column is reduced within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reducer {
    Sum,
    Mean,
    CountDistinct,
    /// First non-null value, for carrying a categorical attribute (such as
    /// the world region) through a country-level grouping.
    First,
}

/// One (column, reducer) pair of an aggregation request.
#[derive(Debug, Clone)]
pub struct Metric {
    pub column: String,
    pub reducer: Reducer,
}

impl Metric {
    pub fn new(column: &str, reducer: Reducer) -> Self {
        Self {
            column: column.to_string(),
            reducer,
        }
    }
}

enum MetricInput {
    Floats(Vec<Option<f64>>),
    Text(Vec<Option<String>>),
}

enum Accumulator {
    Sum(f64),
    Mean { sum: f64, count: usize },
    Distinct(HashSet<String>),
    First(Option<String>),
}

impl Accumulator {
    fn new(reducer: Reducer) -> Self {
        match reducer {
            Reducer::Sum => Accumulator::Sum(0.0),
            Reducer::Mean => Accumulator::Mean { sum: 0.0, count: 0 },
            Reducer::CountDistinct => Accumulator::Distinct(HashSet::new()),
            Reducer::First => Accumulator::First(None),
        }
    }

    fn feed(&mut self, input: &MetricInput, row: usize) {
        match (self, input) {
            (Accumulator::Sum(total), MetricInput::Floats(values)) => {
                if let Some(v) = values[row] {
                    *total += v;
                }
            }
            (Accumulator::Mean { sum, count }, MetricInput::Floats(values)) => {
                if let Some(v) = values[row] {
                    *sum += v;
                    *count += 1;
                }
            }
            (Accumulator::Distinct(seen), MetricInput::Text(values)) => {
                if let Some(v) = &values[row] {
                    seen.insert(v.clone());
                }
            }
            (Accumulator::First(slot), MetricInput::Text(values)) => {
                if slot.is_none() {
                    if let Some(v) = &values[row] {
                        *slot = Some(v.clone());
                    }
                }
            }
            _ => {}
        }
    }

    fn float_result(&self) -> Option<f64> {
        match self {
            Accumulator::Sum(total) => Some(*total),
            Accumulator::Mean { sum, count } => {
                if *count > 0 {
                    Some(sum / *count as f64)
                } else {
                    None
                }
            }
            Accumulator::Distinct(seen) => Some(seen.len() as f64),
            Accumulator::First(_) => None,
        }
    }

    fn text_result(&self) -> Option<String> {
        match self {
            Accumulator::First(slot) => slot.clone(),
            _ => None,
        }
    }
}

/// Group the frame by one or more key columns and reduce each metric.
///
/// Groups come out in first-seen row order. Rows with a null group key are
/// dropped. Missing metric values are skipped: a sum over nothing is 0, a
/// mean over nothing stays missing. Output columns keep the source names;
/// `First` metrics stay textual, the rest are floats.
pub fn aggregate(
    df: &DataFrame,
    group_by: &[&str],
    metrics: &[Metric],
) -> Result<DataFrame, EngineError> {
    if group_by.is_empty() {
        return Err(EngineError::EmptyGroupBy);
    }

    let key_cols: Vec<Vec<Option<String>>> = group_by
        .iter()
        .map(|name| text_values(df, name))
        .collect::<PolarsResult<_>>()?;

    let inputs: Vec<MetricInput> = metrics
        .iter()
        .map(|m| match m.reducer {
            Reducer::Sum | Reducer::Mean => {
                float_values(df, &m.column).map(MetricInput::Floats)
            }
            Reducer::CountDistinct | Reducer::First => {
                text_values(df, &m.column).map(MetricInput::Text)
            }
        })
        .collect::<PolarsResult<_>>()?;

    let mut order: Vec<Vec<String>> = Vec::new();
    let mut index: HashMap<Vec<String>, usize> = HashMap::new();
    let mut accumulators: Vec<Vec<Accumulator>> = Vec::new();

    'rows: for row in 0..df.height() {
        let mut key = Vec::with_capacity(group_by.len());
        for col in &key_cols {
            match &col[row] {
                Some(value) => key.push(value.clone()),
                None => continue 'rows,
            }
        }

        let slot = *index.entry(key.clone()).or_insert_with(|| {
            order.push(key.clone());
            accumulators.push(metrics.iter().map(|m| Accumulator::new(m.reducer)).collect());
            accumulators.len() - 1
        });

        for (metric_idx, input) in inputs.iter().enumerate() {
            accumulators[slot][metric_idx].feed(input, row);
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(group_by.len() + metrics.len());
    for (i, name) in group_by.iter().enumerate() {
        let values: Vec<String> = order.iter().map(|key| key[i].clone()).collect();
        columns.push(Column::new((*name).into(), values));
    }
    for (metric_idx, metric) in metrics.iter().enumerate() {
        match metric.reducer {
            Reducer::First => {
                let values: Vec<Option<String>> = accumulators
                    .iter()
                    .map(|group| group[metric_idx].text_result())
                    .collect();
                columns.push(Column::new(metric.column.as_str().into(), values));
            }
            _ => {
                let values: Vec<Option<f64>> = accumulators
                    .iter()
                    .map(|group| group[metric_idx].float_result())
                    .collect();
                columns.push(Column::new(metric.column.as_str().into(), values));
            }
        }
    }

    Ok(DataFrame::new(columns)?)
}

/// Append a derived ratio column computed from two aggregated fields.
///
/// Ratios are never averaged across rows; they are computed here, after
/// aggregation, from two summed fields. A zero or missing denominator makes
/// the ratio 0 by convention - callers never see NaN.
pub fn with_ratio(
    df: &DataFrame,
    numerator: &str,
    denominator: &str,
    out: &str,
) -> Result<DataFrame, EngineError> {
    let num = float_values(df, numerator)?;
    let den = float_values(df, denominator)?;

    let ratio: Vec<f64> = num
        .iter()
        .zip(den.iter())
        .map(|(n, d)| match (n, d) {
            (Some(n), Some(d)) if *d != 0.0 => n / d,
            _ => 0.0,
        })
        .collect();

    let mut out_df = df.clone();
    out_df.with_column(Column::new(out.into(), ratio))?;
    Ok(out_df)
}
