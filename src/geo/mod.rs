//! Geo Key Resolver
//! Single source of truth mapping place names to map identifiers. Lookups
//! are exact string matches; unresolved names are dropped from map inputs
//! and counted for the caller.

mod tables;

use crate::analysis::frame::text_values;
use polars::prelude::*;
use thiserror::Error;
use tracing::warn;

pub const ISO3_COLUMN: &str = "ISO3";
pub const LAT_COLUMN: &str = "lat";
pub const LON_COLUMN: &str = "lon";

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// ISO 3166-1 alpha-3 code for a canonical country name.
pub fn country_iso3(name: &str) -> Option<&'static str> {
    tables::COUNTRY_ISO3.get(name).copied()
}

/// Representative (latitude, longitude) for a world-region name.
pub fn region_coords(name: &str) -> Option<(f64, f64)> {
    tables::REGION_COORDS.get(name).copied()
}

/// A frame with geographic identifiers attached. Rows whose name did not
/// resolve were dropped; `dropped` reports how many, so the caller can
/// surface it instead of silently losing data.
pub struct GeoJoin {
    pub df: DataFrame,
    pub dropped: usize,
}

/// Attach ISO3 codes to an aggregated country frame (choropleth input).
pub fn attach_iso3(df: &DataFrame, name_column: &str) -> Result<GeoJoin, GeoError> {
    let names = text_values(df, name_column)?;

    let mut keep = vec![false; names.len()];
    let mut codes: Vec<String> = Vec::new();
    let mut dropped = 0usize;

    for (i, name) in names.iter().enumerate() {
        match name.as_deref().and_then(country_iso3) {
            Some(code) => {
                keep[i] = true;
                codes.push(code.to_string());
            }
            None => {
                dropped += 1;
                if let Some(n) = name {
                    warn!(country = %n, "no ISO3 entry, dropped from map input");
                }
            }
        }
    }

    let mask = BooleanChunked::from_slice("mask".into(), &keep);
    let mut out = df.filter(&mask)?;
    out.with_column(Column::new(ISO3_COLUMN.into(), codes))?;
    Ok(GeoJoin { df: out, dropped })
}

/// Attach coordinates to an aggregated world-region frame (scatter-map input).
pub fn attach_coords(df: &DataFrame, name_column: &str) -> Result<GeoJoin, GeoError> {
    let names = text_values(df, name_column)?;

    let mut keep = vec![false; names.len()];
    let mut lats: Vec<f64> = Vec::new();
    let mut lons: Vec<f64> = Vec::new();
    let mut dropped = 0usize;

    for (i, name) in names.iter().enumerate() {
        match name.as_deref().and_then(region_coords) {
            Some((lat, lon)) => {
                keep[i] = true;
                lats.push(lat);
                lons.push(lon);
            }
            None => {
                dropped += 1;
                if let Some(n) = name {
                    warn!(region = %n, "no coordinate entry, dropped from map input");
                }
            }
        }
    }

    let mask = BooleanChunked::from_slice("mask".into(), &keep);
    let mut out = df.filter(&mask)?;
    out.with_column(Column::new(LAT_COLUMN.into(), lats))?;
    out.with_column(Column::new(LON_COLUMN.into(), lons))?;
    Ok(GeoJoin { df: out, dropped })
}
