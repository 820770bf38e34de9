//! Row filtering applied ahead of aggregation.
//! Aggregation never re-reads unfiltered data: every view derives a
//! filtered frame first, then reduces it.

use crate::analysis::aggregate::EngineError;
use crate::analysis::frame::text_values;
use crate::data::columns::{COUNTRY, MONTH, REGION};
use polars::prelude::*;
use std::collections::HashSet;

/// Subset selection for one dashboard interaction.
///
/// Criteria combine with AND; `None` means no constraint. An empty result
/// is a valid empty frame, never an error - callers render a neutral state.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    /// Single origin-region filter (sidebar select).
    pub region: Option<String>,
    /// Origin-region subset (comparison multi-select).
    pub regions: Option<Vec<String>>,
    /// Country subset.
    pub countries: Option<Vec<String>>,
    /// Inclusive month range, canonical `YYYY-MM` strings.
    pub months: Option<(String, String)>,
    /// Calendar-year filter.
    pub year: Option<i32>,
}

impl FilterSpec {
    pub fn region(name: &str) -> Self {
        Self {
            region: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn countries(names: &[String]) -> Self {
        Self {
            countries: Some(names.to_vec()),
            ..Default::default()
        }
    }

    pub fn apply(&self, df: &DataFrame) -> Result<DataFrame, EngineError> {
        let mut keep = vec![true; df.height()];

        if let Some(region) = &self.region {
            let values = text_values(df, REGION)?;
            for (i, v) in values.iter().enumerate() {
                if v.as_deref() != Some(region.as_str()) {
                    keep[i] = false;
                }
            }
        }

        if let Some(regions) = &self.regions {
            let wanted: HashSet<&str> = regions.iter().map(|s| s.as_str()).collect();
            let values = text_values(df, REGION)?;
            for (i, v) in values.iter().enumerate() {
                if !v.as_deref().is_some_and(|r| wanted.contains(r)) {
                    keep[i] = false;
                }
            }
        }

        if let Some(countries) = &self.countries {
            let wanted: HashSet<&str> = countries.iter().map(|s| s.as_str()).collect();
            let values = text_values(df, COUNTRY)?;
            for (i, v) in values.iter().enumerate() {
                if !v.as_deref().is_some_and(|c| wanted.contains(c)) {
                    keep[i] = false;
                }
            }
        }

        if self.months.is_some() || self.year.is_some() {
            let values = text_values(df, MONTH)?;
            for (i, v) in values.iter().enumerate() {
                let Some(month) = v else {
                    keep[i] = false;
                    continue;
                };
                if let Some((from, to)) = &self.months {
                    // canonical YYYY-MM strings order lexicographically
                    if month.as_str() < from.as_str() || month.as_str() > to.as_str() {
                        keep[i] = false;
                    }
                }
                if let Some(year) = self.year {
                    let matches = month
                        .get(..4)
                        .and_then(|y| y.parse::<i32>().ok())
                        == Some(year);
                    if !matches {
                        keep[i] = false;
                    }
                }
            }
        }

        let mask = BooleanChunked::from_slice("mask".into(), &keep);
        Ok(df.filter(&mask)?)
    }
}
