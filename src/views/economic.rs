//! Economic page: nights, stay duration and intensity (nights per tourist).

use crate::analysis::frame::{float_values, sort_by_text};
use crate::analysis::{
    aggregate, mean, median, top_n, with_ratio, FilterSpec, Metric, Reducer,
};
use crate::data::columns::{AVG_STAY, COUNTRY, MONTH, NIGHTS, REGION, TOURISTS};
use crate::views::ViewError;
use polars::prelude::*;
use serde::Serialize;

/// Name of the derived nights-per-tourist column.
pub const INTENSITY: &str = "Intensité économique";

#[derive(Debug, Clone, Serialize)]
pub struct EconomicKpis {
    pub total_nights: f64,
    pub total_tourists: f64,
    pub mean_stay: Option<f64>,
    /// Nights per tourist over the filtered subset; 0 when no tourists.
    pub intensity: f64,
}

pub fn kpis(df: &DataFrame, filter: &FilterSpec) -> Result<EconomicKpis, ViewError> {
    let filtered = filter.apply(df)?;

    let total_nights: f64 = float_values(&filtered, NIGHTS)?.into_iter().flatten().sum();
    let total_tourists: f64 = float_values(&filtered, TOURISTS)?
        .into_iter()
        .flatten()
        .sum();
    let stays: Vec<f64> = float_values(&filtered, AVG_STAY)?
        .into_iter()
        .flatten()
        .collect();

    let intensity = if total_tourists > 0.0 {
        total_nights / total_tourists
    } else {
        0.0
    };

    Ok(EconomicKpis {
        total_nights,
        total_tourists,
        mean_stay: mean(&stays),
        intensity,
    })
}

/// Regions ranked by intensity. The ratio is computed from the summed
/// fields after aggregation, never averaged across rows.
pub fn region_intensity(df: &DataFrame, filter: &FilterSpec) -> Result<DataFrame, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[REGION],
        &[
            Metric::new(TOURISTS, Reducer::Sum),
            Metric::new(NIGHTS, Reducer::Sum),
            Metric::new(AVG_STAY, Reducer::Mean),
        ],
    )?;
    let with_intensity = with_ratio(&agg, NIGHTS, TOURISTS, INTENSITY)?;
    let total = with_intensity.height();
    Ok(top_n(&with_intensity, INTENSITY, total, false)?)
}

/// Volume-vs-stay scatter input: the top-volume countries plus the median
/// reference lines drawn across the quadrants.
#[derive(Debug, Clone)]
pub struct ScatterView {
    pub table: DataFrame,
    pub median_tourists: Option<f64>,
    pub median_stay: Option<f64>,
}

pub fn volume_vs_stay(
    df: &DataFrame,
    filter: &FilterSpec,
    n: usize,
) -> Result<ScatterView, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[COUNTRY],
        &[
            Metric::new(TOURISTS, Reducer::Sum),
            Metric::new(AVG_STAY, Reducer::Mean),
            Metric::new(NIGHTS, Reducer::Sum),
            Metric::new(REGION, Reducer::First),
        ],
    )?;
    let table = top_n(&agg, TOURISTS, n, false)?;

    let tourists: Vec<f64> = float_values(&table, TOURISTS)?.into_iter().flatten().collect();
    let stays: Vec<f64> = float_values(&table, AVG_STAY)?.into_iter().flatten().collect();

    Ok(ScatterView {
        median_tourists: median(&tourists),
        median_stay: median(&stays),
        table,
    })
}

/// Monthly nights and intensity, in calendar order.
pub fn monthly_intensity(df: &DataFrame, filter: &FilterSpec) -> Result<DataFrame, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[MONTH],
        &[
            Metric::new(TOURISTS, Reducer::Sum),
            Metric::new(NIGHTS, Reducer::Sum),
        ],
    )?;
    let with_intensity = with_ratio(&agg, NIGHTS, TOURISTS, INTENSITY)?;
    Ok(sort_by_text(&with_intensity, MONTH)?)
}

/// Ranking criterion of the economic classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankingCriterion {
    TotalNights,
    Intensity,
    AvgStay,
}

impl RankingCriterion {
    pub fn column(self) -> &'static str {
        match self {
            RankingCriterion::TotalNights => NIGHTS,
            RankingCriterion::Intensity => INTENSITY,
            RankingCriterion::AvgStay => AVG_STAY,
        }
    }
}

/// The n countries with the largest economic impact by the chosen criterion.
pub fn ranking(
    df: &DataFrame,
    filter: &FilterSpec,
    criterion: RankingCriterion,
    n: usize,
) -> Result<DataFrame, ViewError> {
    let table = comparison_table(df, filter, None)?;
    Ok(top_n(&table, criterion.column(), n, false)?)
}

/// Per-country sums, mean stay and intensity; optionally restricted to a
/// country subset (the comparison widget).
pub fn comparison_table(
    df: &DataFrame,
    filter: &FilterSpec,
    countries: Option<&[String]>,
) -> Result<DataFrame, ViewError> {
    let mut spec = filter.clone();
    if let Some(countries) = countries {
        spec.countries = Some(countries.to_vec());
    }

    let filtered = spec.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[COUNTRY],
        &[
            Metric::new(TOURISTS, Reducer::Sum),
            Metric::new(NIGHTS, Reducer::Sum),
            Metric::new(AVG_STAY, Reducer::Mean),
        ],
    )?;
    Ok(with_ratio(&agg, NIGHTS, TOURISTS, INTENSITY)?)
}
