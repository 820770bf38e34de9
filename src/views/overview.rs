//! Home page figures: headline KPIs, breakdowns and the monthly trend.

use crate::analysis::frame::{float_values, sort_by_text, text_values, unique_text};
use crate::analysis::{aggregate, mean, top_n, EngineError, Metric, Reducer};
use crate::data::columns::{AVG_STAY, COUNTRY, MONTH, NIGHTS, REGION, TOURISTS};
use polars::prelude::*;
use serde::Serialize;

/// Headline figures for the whole loaded period.
#[derive(Debug, Clone, Serialize)]
pub struct OverviewKpis {
    pub total_tourists: f64,
    pub total_nights: f64,
    pub mean_stay: Option<f64>,
    pub countries: usize,
    pub regions: usize,
}

pub fn kpis(df: &DataFrame) -> Result<OverviewKpis, EngineError> {
    let tourists = float_values(df, TOURISTS)?;
    let nights = float_values(df, NIGHTS)?;
    let stays: Vec<f64> = float_values(df, AVG_STAY)?.into_iter().flatten().collect();

    Ok(OverviewKpis {
        total_tourists: tourists.into_iter().flatten().sum(),
        total_nights: nights.into_iter().flatten().sum(),
        mean_stay: mean(&stays),
        countries: unique_text(df, COUNTRY).len(),
        regions: unique_text(df, REGION).len(),
    })
}

/// Tourists per world region, largest first.
pub fn region_breakdown(df: &DataFrame) -> Result<DataFrame, EngineError> {
    let agg = aggregate(df, &[REGION], &[Metric::new(TOURISTS, Reducer::Sum)])?;
    let total = agg.height();
    top_n(&agg, TOURISTS, total, false)
}

/// The n countries sending the most tourists.
pub fn top_countries(df: &DataFrame, n: usize) -> Result<DataFrame, EngineError> {
    let agg = aggregate(df, &[COUNTRY], &[Metric::new(TOURISTS, Reducer::Sum)])?;
    top_n(&agg, TOURISTS, n, false)
}

/// Tourists and nights per month, in calendar order.
pub fn monthly_trend(df: &DataFrame) -> Result<DataFrame, EngineError> {
    let agg = aggregate(
        df,
        &[MONTH],
        &[
            Metric::new(TOURISTS, Reducer::Sum),
            Metric::new(NIGHTS, Reducer::Sum),
        ],
    )?;
    Ok(sort_by_text(&agg, MONTH)?)
}

/// Peak month and first-to-last growth of a monthly trend.
#[derive(Debug, Clone, Serialize)]
pub struct TrendHighlights {
    pub peak_month: String,
    pub peak_tourists: f64,
    /// Percentage change between the first and last month; `None` when
    /// there are fewer than two months or the first month is zero.
    pub growth_pct: Option<f64>,
}

pub fn trend_highlights(trend: &DataFrame) -> Result<Option<TrendHighlights>, EngineError> {
    let months = text_values(trend, MONTH)?;
    let tourists = float_values(trend, TOURISTS)?;

    let series: Vec<(String, f64)> = months
        .into_iter()
        .zip(tourists)
        .filter_map(|(m, t)| Some((m?, t?)))
        .collect();

    let Some((peak_month, peak_tourists)) = series
        .iter()
        .cloned()
        .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    else {
        return Ok(None);
    };

    let growth_pct = match (series.first(), series.last()) {
        (Some((_, first)), Some((_, last))) if series.len() > 1 && *first != 0.0 => {
            Some((last - first) / first * 100.0)
        }
        _ => None,
    };

    Ok(Some(TrendHighlights {
        peak_month,
        peak_tourists,
        growth_pct,
    }))
}
