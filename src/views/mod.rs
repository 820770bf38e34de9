//! Pure data functions behind the four dashboard pages.
//!
//! Pages only render what these functions return; no business rule lives
//! behind a rendering call, and no page does its own numeric parsing.

pub mod economic;
pub mod international;
pub mod overview;
pub mod regional;

use crate::analysis::{EngineError, Reducer};
use crate::data::columns::{AVG_STAY, NIGHTS, TOURISTS};
use crate::geo::GeoError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ViewError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Geo(#[from] GeoError),
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),
}

/// Indicator a user can pick in the page sidebars.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Tourists,
    Nights,
    AvgStay,
}

impl Indicator {
    pub const ALL: [Indicator; 3] = [Indicator::Tourists, Indicator::Nights, Indicator::AvgStay];

    pub fn column(self) -> &'static str {
        match self {
            Indicator::Tourists => TOURISTS,
            Indicator::Nights => NIGHTS,
            Indicator::AvgStay => AVG_STAY,
        }
    }

    /// Counts are summed; the stay duration is averaged, never summed.
    pub fn reducer(self) -> Reducer {
        match self {
            Indicator::Tourists | Indicator::Nights => Reducer::Sum,
            Indicator::AvgStay => Reducer::Mean,
        }
    }
}
