//! Offline chart cache keyed by birth-detail fingerprints.

pub mod fingerprint;
pub mod record;
pub mod store;

pub use fingerprint::{BirthFingerprint, COORDINATE_TOLERANCE};
pub use record::CachedChartRecord;
pub use store::{ChartStore, FileChartStore, MemoryChartStore};

use crate::birth::BirthDetails;
use crate::chart::NatalChart;
use std::path::Path;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CacheError {
    #[error("Cache I/O failed at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Could not encode cached {part}: {message}")]
    Encode { part: String, message: String },
    #[error("Corrupt cache entry at {location}: {message}")]
    Decode { location: String, message: String },
}

impl CacheError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        CacheError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

/// Saves and serves charts by birth-detail fingerprint.
///
/// Operations block on the underlying store.
pub struct ChartCache<S: ChartStore> {
    store: S,
    // Serializes read-modify-write of buckets
    write_lock: Mutex<()>,
}

impl<S: ChartStore> ChartCache<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save `chart` under the fingerprint of `details`, replacing any entry
    /// that already matches it. A bucket that no longer decodes is replaced
    /// wholesale.
    pub fn save(&self, chart: &NatalChart, details: &BirthDetails) -> Result<(), CacheError> {
        let fingerprint = BirthFingerprint::of(details);
        let key = fingerprint.bucket_key();
        let record = CachedChartRecord::from_chart(chart, details, &key)?;

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut records = match self.store.load(&key) {
            Ok(records) => records,
            Err(CacheError::Decode { location, message }) => {
                log::warn!("Discarding corrupt cache bucket {}: {}", location, message);
                Vec::new()
            }
            Err(e) => return Err(e),
        };
        match records
            .iter()
            .position(|r| BirthFingerprint::of(&r.birth_details).matches(&fingerprint))
        {
            Some(index) => {
                log::debug!("Replacing cached chart for '{}'", details.name);
                records[index] = record;
            }
            None => records.push(record),
        }
        self.store.store(&key, &records)?;
        log::info!("Cached chart for '{}' ({})", details.name, &key[..12]);
        Ok(())
    }

    /// The chart previously saved for matching details, or `None` on a miss.
    pub fn find(&self, details: &BirthDetails) -> Result<Option<NatalChart>, CacheError> {
        let fingerprint = BirthFingerprint::of(details);
        let key = fingerprint.bucket_key();
        let records = self.store.load(&key)?;

        match records
            .iter()
            .find(|r| BirthFingerprint::of(&r.birth_details).matches(&fingerprint))
        {
            Some(record) => {
                log::debug!("Cache hit for '{}'", details.name);
                record.to_chart().map(Some)
            }
            None => {
                log::debug!("Cache miss for '{}'", details.name);
                Ok(None)
            }
        }
    }

    /// Drop the entry matching `details`. Returns whether one existed.
    pub fn remove(&self, details: &BirthDetails) -> Result<bool, CacheError> {
        let fingerprint = BirthFingerprint::of(details);
        let key = fingerprint.bucket_key();

        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut records = self.store.load(&key)?;
        let before = records.len();
        records.retain(|r| !BirthFingerprint::of(&r.birth_details).matches(&fingerprint));
        if records.len() == before {
            return Ok(false);
        }
        self.store.store(&key, &records)?;
        Ok(true)
    }
}
