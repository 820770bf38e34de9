//! Process-wide dataset cache: loaded once at startup, read-only afterwards.
//!
//! Dataset loading is the expensive part of a session; every later filter
//! change recomputes aggregates from these cached frames without touching
//! the disk again.

use crate::config::DataPaths;
use crate::data::loader::{DatasetStore, LoadError};
use once_cell::sync::OnceCell;

static STORE: OnceCell<DatasetStore> = OnceCell::new();

/// Load the datasets once for the whole process. Later calls return the
/// already-loaded store without reading any file.
pub fn init(paths: &DataPaths) -> Result<&'static DatasetStore, LoadError> {
    STORE.get_or_try_init(|| DatasetStore::load(paths))
}

/// The store, if [`init`] already succeeded.
pub fn get() -> Option<&'static DatasetStore> {
    STORE.get()
}
