//! International page: country-level ranking, comparison and evolution.

use crate::analysis::frame::{float_values, sort_by_text, text_values};
use crate::analysis::{aggregate, mean, top_n, FilterSpec, Metric, Reducer};
use crate::data::columns::{AVG_STAY, COUNTRY, MONTH, NIGHTS, REGION, TOURISTS};
use crate::views::ViewError;
use crate::views::Indicator;
use polars::prelude::*;
use serde::Serialize;

/// Per-country totals with the world region carried through as `First`.
pub fn country_summary(df: &DataFrame, filter: &FilterSpec) -> Result<DataFrame, ViewError> {
    let filtered = filter.apply(df)?;
    Ok(aggregate(
        &filtered,
        &[COUNTRY],
        &[
            Metric::new(TOURISTS, Reducer::Sum),
            Metric::new(NIGHTS, Reducer::Sum),
            Metric::new(AVG_STAY, Reducer::Mean),
            Metric::new(REGION, Reducer::First),
        ],
    )?)
}

/// The n best (or worst) countries by the chosen indicator.
pub fn rank_countries(
    df: &DataFrame,
    filter: &FilterSpec,
    indicator: Indicator,
    n: usize,
    ascending: bool,
) -> Result<DataFrame, ViewError> {
    let summary = country_summary(df, filter)?;
    Ok(top_n(&summary, indicator.column(), n, ascending)?)
}

/// One country of a multi-criteria comparison, each metric normalized to
/// the selection's maximum (100 = best of the selection, 0 on an empty
/// maximum).
#[derive(Debug, Clone, Serialize)]
pub struct RadarRow {
    pub country: String,
    pub tourists_pct: f64,
    pub nights_pct: f64,
    pub stay_pct: f64,
}

pub fn comparison_radar(
    df: &DataFrame,
    filter: &FilterSpec,
    countries: &[String],
) -> Result<Vec<RadarRow>, ViewError> {
    let mut spec = filter.clone();
    spec.countries = Some(countries.to_vec());
    let summary = country_summary(df, &spec)?;

    let names = text_values(&summary, COUNTRY)?;
    let tourists = float_values(&summary, TOURISTS)?;
    let nights = float_values(&summary, NIGHTS)?;
    let stays = float_values(&summary, AVG_STAY)?;

    let max_of = |values: &[Option<f64>]| {
        values
            .iter()
            .flatten()
            .cloned()
            .fold(0.0_f64, f64::max)
    };
    let max_tourists = max_of(&tourists);
    let max_nights = max_of(&nights);
    let max_stay = max_of(&stays);

    let pct = |value: Option<f64>, max: f64| {
        if max > 0.0 {
            value.unwrap_or(0.0) / max * 100.0
        } else {
            0.0
        }
    };

    Ok(names
        .into_iter()
        .enumerate()
        .filter_map(|(i, name)| {
            Some(RadarRow {
                country: name?,
                tourists_pct: pct(tourists[i], max_tourists),
                nights_pct: pct(nights[i], max_nights),
                stay_pct: pct(stays[i], max_stay),
            })
        })
        .collect())
}

/// Monthly tourist counts for a country subset, in calendar order.
pub fn evolution_by_country(
    df: &DataFrame,
    filter: &FilterSpec,
    countries: &[String],
) -> Result<DataFrame, ViewError> {
    let mut spec = filter.clone();
    spec.countries = Some(countries.to_vec());

    let filtered = spec.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[MONTH, COUNTRY],
        &[Metric::new(TOURISTS, Reducer::Sum)],
    )?;
    Ok(sort_by_text(&agg, MONTH)?)
}

/// Headline statistics of the filtered country summary.
#[derive(Debug, Clone, Serialize)]
pub struct InternationalStats {
    pub total_tourists: f64,
    /// Mean tourist total per country; `None` with no countries.
    pub mean_per_country: Option<f64>,
    /// Country with the largest tourist total.
    pub top_country: Option<String>,
    pub mean_stay: Option<f64>,
}

pub fn stats(df: &DataFrame, filter: &FilterSpec) -> Result<InternationalStats, ViewError> {
    let summary = country_summary(df, filter)?;

    let per_country: Vec<f64> = float_values(&summary, TOURISTS)?
        .into_iter()
        .flatten()
        .collect();
    let stays: Vec<f64> = float_values(&summary, AVG_STAY)?
        .into_iter()
        .flatten()
        .collect();

    let leader = top_n(&summary, TOURISTS, 1, false)?;
    let top_country = text_values(&leader, COUNTRY)?.into_iter().next().flatten();

    Ok(InternationalStats {
        total_tourists: per_country.iter().sum(),
        mean_per_country: mean(&per_country),
        top_country,
        mean_stay: mean(&stays),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Pays".into(),
                vec!["Allemagne", "Italie", "Chine", "Allemagne"],
            ),
            Column::new("Region".into(), vec!["Europe", "Europe", "Asie", "Europe"]),
            Column::new(
                "Mois".into(),
                vec!["2024-01", "2024-01", "2024-02", "2024-02"],
            ),
            Column::new("Nombre de touristes".into(), vec![100.0, 50.0, 30.0, 120.0]),
            Column::new(
                "Nuitées touristiques".into(),
                vec![400.0, 150.0, 90.0, 480.0],
            ),
            Column::new("Durée de séjour moyenne".into(), vec![4.0, 3.0, 3.0, 5.0]),
        ])
        .unwrap()
    }

    #[test]
    fn summary_carries_region_and_sums_per_country() {
        let summary = country_summary(&sample(), &FilterSpec::default()).unwrap();
        assert_eq!(summary.height(), 3);

        let names = text_values(&summary, "Pays").unwrap();
        let totals = float_values(&summary, "Nombre de touristes").unwrap();
        let regions = text_values(&summary, "Region").unwrap();
        assert_eq!(names[0].as_deref(), Some("Allemagne"));
        assert_eq!(totals[0], Some(220.0));
        assert_eq!(regions[0].as_deref(), Some("Europe"));
    }

    #[test]
    fn ranking_both_directions() {
        let best = rank_countries(&sample(), &FilterSpec::default(), Indicator::Tourists, 1, false)
            .unwrap();
        assert_eq!(
            text_values(&best, "Pays").unwrap()[0].as_deref(),
            Some("Allemagne")
        );

        let worst = rank_countries(&sample(), &FilterSpec::default(), Indicator::Tourists, 1, true)
            .unwrap();
        assert_eq!(
            text_values(&worst, "Pays").unwrap()[0].as_deref(),
            Some("Chine")
        );
    }

    #[test]
    fn radar_normalizes_to_the_selection_maximum() {
        let rows = comparison_radar(
            &sample(),
            &FilterSpec::default(),
            &["Allemagne".to_string(), "Italie".to_string()],
        )
        .unwrap();
        assert_eq!(rows.len(), 2);

        let germany = rows.iter().find(|r| r.country == "Allemagne").unwrap();
        let italy = rows.iter().find(|r| r.country == "Italie").unwrap();
        assert_eq!(germany.tourists_pct, 100.0);
        assert!((italy.tourists_pct - 50.0 / 220.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn stats_headline() {
        let stats = stats(&sample(), &FilterSpec::default()).unwrap();
        assert_eq!(stats.total_tourists, 300.0);
        assert_eq!(stats.mean_per_country, Some(100.0));
        assert_eq!(stats.top_country.as_deref(), Some("Allemagne"));
    }

    #[test]
    fn stats_over_empty_filter_result() {
        let stats = stats(&sample(), &FilterSpec::region("Antarctique")).unwrap();
        assert_eq!(stats.total_tourists, 0.0);
        assert_eq!(stats.mean_per_country, None);
        assert_eq!(stats.top_country, None);
    }
}
