//! Persistent storage backends for cached charts.

use crate::cache::record::CachedChartRecord;
use crate::cache::CacheError;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::NamedTempFile;

/// Bucketed record storage. A bucket holds every record sharing a
/// fingerprint bucket key; storing an empty bucket removes it.
pub trait ChartStore: Send + Sync {
    fn load(&self, bucket: &str) -> Result<Vec<CachedChartRecord>, CacheError>;
    fn store(&self, bucket: &str, records: &[CachedChartRecord]) -> Result<(), CacheError>;
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryChartStore {
    buckets: Mutex<HashMap<String, Vec<CachedChartRecord>>>,
}

impl MemoryChartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_count(&self) -> usize {
        self.buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .values()
            .map(Vec::len)
            .sum()
    }
}

impl ChartStore for MemoryChartStore {
    fn load(&self, bucket: &str) -> Result<Vec<CachedChartRecord>, CacheError> {
        let buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        Ok(buckets.get(bucket).cloned().unwrap_or_default())
    }

    fn store(&self, bucket: &str, records: &[CachedChartRecord]) -> Result<(), CacheError> {
        let mut buckets = self
            .buckets
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if records.is_empty() {
            buckets.remove(bucket);
        } else {
            buckets.insert(bucket.to_string(), records.to_vec());
        }
        Ok(())
    }
}

/// One JSON file per bucket under a directory
#[derive(Debug, Clone)]
pub struct FileChartStore {
    root: PathBuf,
}

impl FileChartStore {
    /// Open (creating if needed) a store rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| CacheError::io(&root, e))?;
        Ok(Self { root })
    }

    /// Platform cache directory, e.g. `~/.cache/urania/charts`
    pub fn default_location() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join("urania").join("charts"))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn bucket_path(&self, bucket: &str) -> PathBuf {
        self.root.join(format!("{}.json", bucket))
    }
}

impl ChartStore for FileChartStore {
    fn load(&self, bucket: &str) -> Result<Vec<CachedChartRecord>, CacheError> {
        let path = self.bucket_path(bucket);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(CacheError::io(&path, e)),
        };
        serde_json::from_str(&text).map_err(|e| CacheError::Decode {
            location: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn store(&self, bucket: &str, records: &[CachedChartRecord]) -> Result<(), CacheError> {
        let path = self.bucket_path(bucket);
        if records.is_empty() {
            return match fs::remove_file(&path) {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(CacheError::io(&path, e)),
            };
        }

        let json = serde_json::to_string_pretty(records).map_err(|e| CacheError::Encode {
            part: "record".to_string(),
            message: e.to_string(),
        })?;

        // Readers never see a half-written bucket; the temp file is removed
        // on drop if the rename does not happen
        let mut tmp =
            NamedTempFile::new_in(&self.root).map_err(|e| CacheError::io(&self.root, e))?;
        tmp.write_all(json.as_bytes())
            .map_err(|e| CacheError::io(tmp.path(), e))?;
        tmp.persist(&path).map_err(|e| CacheError::io(&path, e.error))?;
        log::debug!("Wrote {} cached chart(s) to {}", records.len(), path.display());
        Ok(())
    }
}
