//! Canonical column names shared by every dataset.

pub const COUNTRY: &str = "Pays";
pub const REGION: &str = "Region";
pub const MONTH: &str = "Mois";
pub const TOURISTS: &str = "Nombre de touristes";
pub const CRUISE: &str = "Nombre de croisièristes";
pub const NIGHTS: &str = "Nuitées touristiques";
pub const AVG_STAY: &str = "Durée de séjour moyenne";

/// Misspelled duration header found in the raw sources. Renamed to
/// [`AVG_STAY`] on ingest so downstream code only ever sees one name.
pub const AVG_STAY_RAW: &str = "Durée de séjor moyenne";

/// Columns that get numeric coercion when present in a dataset. Datasets
/// with a smaller schema simply skip the columns they lack.
pub const NUMERIC_COLUMNS: [&str; 4] = [TOURISTS, CRUISE, NIGHTS, AVG_STAY];
