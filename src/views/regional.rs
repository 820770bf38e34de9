//! Regional page: map inputs, rankings and per-region evolution.
//! Every function filters first, then aggregates.

use crate::analysis::frame::sort_by_text;
use crate::analysis::{aggregate, top_n, FilterSpec, Metric, Reducer};
use crate::data::columns::{AVG_STAY, COUNTRY, MONTH, NIGHTS, REGION, TOURISTS};
use crate::geo::{attach_coords, attach_iso3, GeoJoin};
use crate::views::overview::{self, OverviewKpis};
use crate::views::{Indicator, ViewError};
use polars::prelude::*;

fn standard_metrics() -> Vec<Metric> {
    vec![
        Metric::new(TOURISTS, Reducer::Sum),
        Metric::new(NIGHTS, Reducer::Sum),
        Metric::new(AVG_STAY, Reducer::Mean),
    ]
}

/// Choropleth input: per-country totals with ISO3 codes attached.
pub fn country_map(df: &DataFrame, filter: &FilterSpec) -> Result<GeoJoin, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(&filtered, &[COUNTRY], &standard_metrics())?;
    Ok(attach_iso3(&agg, COUNTRY)?)
}

/// Scatter-map input: per-world-region totals with coordinates attached.
pub fn region_map(df: &DataFrame, filter: &FilterSpec) -> Result<GeoJoin, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(&filtered, &[REGION], &standard_metrics())?;
    Ok(attach_coords(&agg, REGION)?)
}

/// Top regions by the chosen indicator.
pub fn top_regions(
    df: &DataFrame,
    filter: &FilterSpec,
    indicator: Indicator,
    n: usize,
) -> Result<DataFrame, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[REGION],
        &[Metric::new(indicator.column(), indicator.reducer())],
    )?;
    Ok(top_n(&agg, indicator.column(), n, false)?)
}

/// Regions ranked by average stay duration, longest first.
pub fn stay_ranking(df: &DataFrame, filter: &FilterSpec, n: usize) -> Result<DataFrame, ViewError> {
    let filtered = filter.apply(df)?;
    let agg = aggregate(&filtered, &[REGION], &[Metric::new(AVG_STAY, Reducer::Mean)])?;
    Ok(top_n(&agg, AVG_STAY, n, false)?)
}

/// Monthly tourist counts for a region subset, in calendar order.
pub fn evolution_by_region(
    df: &DataFrame,
    filter: &FilterSpec,
    regions: &[String],
) -> Result<DataFrame, ViewError> {
    let mut spec = filter.clone();
    spec.regions = Some(regions.to_vec());

    let filtered = spec.apply(df)?;
    let agg = aggregate(
        &filtered,
        &[MONTH, REGION],
        &[Metric::new(TOURISTS, Reducer::Sum)],
    )?;
    Ok(sort_by_text(&agg, MONTH)?)
}

/// Headline figures for the filtered subset.
pub fn kpis(df: &DataFrame, filter: &FilterSpec) -> Result<OverviewKpis, ViewError> {
    let filtered = filter.apply(df)?;
    Ok(overview::kpis(&filtered)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::frame::{float_values, text_values};

    fn sample() -> DataFrame {
        DataFrame::new(vec![
            Column::new(
                "Pays".into(),
                vec!["Allemagne", "Chine", "Andorre", "Japon"],
            ),
            Column::new("Region".into(), vec!["Europe", "Asie", "Europe", "Asie"]),
            Column::new(
                "Mois".into(),
                vec!["2024-01", "2024-01", "2024-02", "2024-02"],
            ),
            Column::new("Nombre de touristes".into(), vec![100.0, 30.0, 5.0, 80.0]),
            Column::new(
                "Nuitées touristiques".into(),
                vec![400.0, 90.0, 10.0, 320.0],
            ),
            Column::new(
                "Durée de séjour moyenne".into(),
                vec![4.0, 3.0, 2.0, 4.5],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn country_map_drops_unmapped_countries() {
        let map = country_map(&sample(), &FilterSpec::default()).unwrap();
        // Andorre has no ISO3 entry
        assert_eq!(map.dropped, 1);
        assert_eq!(map.df.height(), 3);
        assert!(map.df.column("ISO3").is_ok());
    }

    #[test]
    fn region_map_carries_coordinates() {
        let map = region_map(&sample(), &FilterSpec::default()).unwrap();
        assert_eq!(map.dropped, 0);
        assert!(map.df.column("lat").is_ok());
        assert!(map.df.column("lon").is_ok());
    }

    #[test]
    fn filter_applies_before_aggregation() {
        let spec = FilterSpec {
            months: Some(("2024-01".to_string(), "2024-01".to_string())),
            ..Default::default()
        };
        let top = top_regions(&sample(), &spec, Indicator::Tourists, 10).unwrap();

        let regions = text_values(&top, "Region").unwrap();
        let totals = float_values(&top, "Nombre de touristes").unwrap();
        assert_eq!(regions[0].as_deref(), Some("Europe"));
        // only January's 100, not February's 5
        assert_eq!(totals[0], Some(100.0));
    }

    #[test]
    fn evolution_is_in_calendar_order() {
        let evolution = evolution_by_region(
            &sample(),
            &FilterSpec::default(),
            &["Asie".to_string()],
        )
        .unwrap();
        let months = text_values(&evolution, "Mois").unwrap();
        assert_eq!(months[0].as_deref(), Some("2024-01"));
        assert_eq!(months[1].as_deref(), Some("2024-02"));
    }

    #[test]
    fn kpis_reflect_the_filter() {
        let kpis = kpis(&sample(), &FilterSpec::region("Asie")).unwrap();
        assert_eq!(kpis.total_tourists, 110.0);
        assert_eq!(kpis.countries, 2);
    }
}
