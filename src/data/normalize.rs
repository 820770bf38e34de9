//! Numeric Normalizer
//! Turns locale-formatted cell values (decimal comma, point thousands
//! separators, stray quotes) into typed floats. Anything unparsable becomes
//! missing, never an error.

use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashMap;
use tracing::warn;

/// Parse one raw cell for a numeric column.
///
/// Surrounding whitespace and quote characters are stripped. A value
/// containing a decimal comma is read as French-formatted: `.` is a
/// thousands separator and `,` the decimal point, so `"1.234,5"` parses to
/// `1234.5`. Values that fail to parse (including trailing garbage) are
/// reported as missing - the caller can always tell missing from zero.
pub fn parse_numeric_cell(raw: &str) -> Option<f64> {
    let trimmed = raw.trim().trim_matches('"').trim();
    if trimmed.is_empty() {
        return None;
    }

    let parsed = if trimmed.contains(',') {
        let no_thousands: String = trimmed.chars().filter(|c| *c != '.').collect();
        no_thousands.replace(',', ".").parse::<f64>()
    } else {
        trimmed.parse::<f64>()
    };

    // "nan"/"inf" parse as floats but carry no usable value.
    parsed.ok().filter(|v| v.is_finite())
}

/// Canonicalize a month cell to a `YYYY-MM` string, validated with chrono.
/// Full dates (`YYYY-MM-DD`, timestamps) are truncated to their month.
pub fn canonical_month(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_matches('"');
    let candidate = trimmed.get(..7)?;
    NaiveDate::parse_from_str(&format!("{candidate}-01"), "%Y-%m-%d").ok()?;
    Some(candidate.to_string())
}

/// Per-column count of cells that failed numeric coercion.
///
/// Diagnostic only: the counts are surfaced for operator visibility and
/// never feed back into correctness decisions.
#[derive(Debug, Default, Clone)]
pub struct MissingTally {
    counts: HashMap<String, usize>,
}

impl MissingTally {
    pub fn record(&mut self, column: &str, missing: usize) {
        self.counts.insert(column.to_string(), missing);
    }

    pub fn get(&self, column: &str) -> usize {
        self.counts.get(column).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Emit one warning per column that lost values.
    pub fn log_missing(&self) {
        for (column, missing) in &self.counts {
            if *missing > 0 {
                warn!(column = %column, missing, "values could not be parsed as numbers");
            }
        }
    }
}

/// Apply [`parse_numeric_cell`] to every listed column present in the frame.
///
/// Columns already numeric are cast through unchanged (the whole pass is
/// idempotent); columns the dataset lacks are skipped. Returns the missing
/// tally for the caller to log.
pub fn normalize_numeric_columns(
    df: &mut DataFrame,
    columns: &[&str],
) -> Result<MissingTally, PolarsError> {
    let mut tally = MissingTally::default();

    for name in columns {
        let Ok(column) = df.column(name) else {
            continue;
        };
        let column = column.clone();

        let parsed: Vec<Option<f64>> = match column.str() {
            Ok(ca) => ca.into_iter().map(|v| v.and_then(parse_numeric_cell)).collect(),
            Err(_) => {
                let casted = column.cast(&DataType::Float64)?;
                casted.f64()?.into_iter().collect()
            }
        };

        tally.record(name, parsed.iter().filter(|v| v.is_none()).count());
        df.with_column(Column::new((*name).into(), parsed))?;
    }

    Ok(tally)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_comma_equals_decimal_point() {
        for (comma, point) in [("3,5", "3.5"), ("0,25", "0.25"), ("12,0", "12.0")] {
            assert_eq!(parse_numeric_cell(comma), parse_numeric_cell(point));
        }
    }

    #[test]
    fn french_thousands_format() {
        assert_eq!(parse_numeric_cell("1.234,5"), Some(1234.5));
        assert_eq!(parse_numeric_cell("12.345.678,9"), Some(12345678.9));
    }

    #[test]
    fn quotes_and_whitespace_are_stripped() {
        assert_eq!(parse_numeric_cell("  \"1234,5\"  "), Some(1234.5));
        assert_eq!(parse_numeric_cell("\" 42 \""), Some(42.0));
    }

    #[test]
    fn unparsable_values_are_missing_not_errors() {
        for raw in ["", "   ", "abc", "12abc", "3,5 jours", "nan", "inf"] {
            assert_eq!(parse_numeric_cell(raw), None, "input: {raw:?}");
        }
    }

    #[test]
    fn idempotent_over_normalized_output() {
        let once = parse_numeric_cell("1.234,5").unwrap();
        assert_eq!(parse_numeric_cell(&once.to_string()), Some(once));
        assert_eq!(parse_numeric_cell("1234.5"), Some(1234.5));
    }

    #[test]
    fn month_canonicalization() {
        assert_eq!(canonical_month("2024-01"), Some("2024-01".to_string()));
        assert_eq!(canonical_month("2024-01-15"), Some("2024-01".to_string()));
        assert_eq!(canonical_month("\"2024-12\""), Some("2024-12".to_string()));
        assert_eq!(canonical_month("2024-13"), None);
        assert_eq!(canonical_month("janvier"), None);
        assert_eq!(canonical_month(""), None);
    }

    #[test]
    fn normalizes_text_columns_and_tallies_missing() {
        let mut df = DataFrame::new(vec![
            Column::new("Pays".into(), vec!["Allemagne", "Italie", "Chine"]),
            Column::new(
                "Nombre de touristes".into(),
                vec!["1.234,5", "n/a", "200"],
            ),
        ])
        .unwrap();

        let tally = normalize_numeric_columns(&mut df, &["Nombre de touristes"]).unwrap();
        assert_eq!(tally.get("Nombre de touristes"), 1);

        let values: Vec<Option<f64>> = df
            .column("Nombre de touristes")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(1234.5), None, Some(200.0)]);
    }

    #[test]
    fn numeric_columns_pass_through_unchanged() {
        let mut df = DataFrame::new(vec![Column::new(
            "Nuitées touristiques".into(),
            vec![Some(10.0), None, Some(30.5)],
        )])
        .unwrap();

        let tally = normalize_numeric_columns(&mut df, &["Nuitées touristiques"]).unwrap();
        assert_eq!(tally.get("Nuitées touristiques"), 1);

        let values: Vec<Option<f64>> = df
            .column("Nuitées touristiques")
            .unwrap()
            .f64()
            .unwrap()
            .into_iter()
            .collect();
        assert_eq!(values, vec![Some(10.0), None, Some(30.5)]);
    }

    #[test]
    fn absent_columns_are_skipped() {
        let mut df =
            DataFrame::new(vec![Column::new("Pays".into(), vec!["Japon"])]).unwrap();
        let tally = normalize_numeric_columns(&mut df, &["Nombre de touristes"]).unwrap();
        assert_eq!(tally.total(), 0);
    }
}
