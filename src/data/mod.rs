//! Data module - cleaning, normalization and session loading.

pub mod cleaner;
pub mod columns;
pub mod loader;
pub mod normalize;
pub mod store;

use std::fmt;

pub use cleaner::{clean_datasets, CleanError};
pub use loader::{DatasetStore, LoadError};
pub use normalize::{parse_numeric_cell, MissingTally};

/// Stable identifier of one source dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKey {
    Mensuelle,
    Region,
    Hoteliere,
}

impl DatasetKey {
    pub const ALL: [DatasetKey; 3] = [
        DatasetKey::Mensuelle,
        DatasetKey::Region,
        DatasetKey::Hoteliere,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKey::Mensuelle => "frequentation_mensuelle",
            DatasetKey::Region => "frequentation_region",
            DatasetKey::Hoteliere => "frequentation_hoteliere",
        }
    }

    pub fn raw_filename(self) -> &'static str {
        match self {
            DatasetKey::Mensuelle => "frequentation_mensuelle.csv",
            DatasetKey::Region => "frequentation_region.csv",
            DatasetKey::Hoteliere => "frequentation_hoteliere.csv",
        }
    }

    pub fn cleaned_filename(self) -> &'static str {
        match self {
            DatasetKey::Mensuelle => "frequentation_mensuelle_cleaned.csv",
            DatasetKey::Region => "frequentation_region_cleaned.csv",
            DatasetKey::Hoteliere => "frequentation_hoteliere_cleaned.csv",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.as_str() == key)
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_roundtrip() {
        for key in DatasetKey::ALL {
            assert_eq!(DatasetKey::from_key(key.as_str()), Some(key));
        }
        assert_eq!(DatasetKey::from_key("frequentation_inconnue"), None);
    }
}
