use crate::birth::GeoCoordinate;
use crate::ephemeris::naming::MappingPolicy;
use crate::ephemeris::types::ProviderResponse;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

/// Errors that can occur in a position provider
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Invalid house system: {system}. Valid systems: {valid:?}")]
    InvalidHouseSystem { system: String, valid: Vec<String> },
    #[error("Failed to calculate position for {planet_id} at {datetime}: {message}")]
    CalculationFailed {
        planet_id: String,
        datetime: DateTime<Utc>,
        message: String,
    },
    #[error("House calculation failed: {message}")]
    HouseCalculationFailed { message: String },
    #[error("Ephemeris initialization failed for {path}: {message}")]
    InitializationFailed { path: String, message: String },
    #[error("Provider response could not be read from {source_name}: {message}")]
    InvalidResponse { source_name: String, message: String },
}

/// Source of raw planetary and house positions.
pub trait PositionProvider {
    fn name(&self) -> &str;

    /// Policy for names in this provider's responses
    fn mapping_policy(&self) -> MappingPolicy {
        MappingPolicy::Strict
    }

    /// Positions and cusps for a UTC instant at a location
    fn positions(
        &self,
        instant: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<ProviderResponse, EphemerisError>;
}

impl<P: PositionProvider + ?Sized> PositionProvider for &P {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn mapping_policy(&self) -> MappingPolicy {
        (**self).mapping_policy()
    }

    fn positions(
        &self,
        instant: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<ProviderResponse, EphemerisError> {
        (**self).positions(instant, location)
    }
}

/// Once-per-process data path setup for a provider.
///
/// The first successful `ensure` runs its initializer; every later call is a
/// no-op. A failed initializer leaves the guard unset so a later call may try
/// again.
#[derive(Debug)]
pub struct InitGuard {
    data_path: Mutex<Option<PathBuf>>,
}

impl InitGuard {
    pub const fn new() -> Self {
        Self {
            data_path: Mutex::new(None),
        }
    }

    /// Run `init` for `path` unless the guard is already set. Returns whether
    /// `init` ran.
    pub fn ensure<F>(&self, path: &Path, init: F) -> Result<bool, EphemerisError>
    where
        F: FnOnce(&Path) -> Result<(), EphemerisError>,
    {
        let mut data_path = self
            .data_path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(existing) = data_path.as_ref() {
            if existing != path {
                log::warn!(
                    "Ephemeris data path already set to {}; ignoring {}",
                    existing.display(),
                    path.display()
                );
            }
            return Ok(false);
        }

        init(path)?;
        log::info!("Ephemeris data path initialized: {}", path.display());
        *data_path = Some(path.to_path_buf());
        Ok(true)
    }

    pub fn is_initialized(&self) -> bool {
        self.data_path().is_some()
    }

    pub fn data_path(&self) -> Option<PathBuf> {
        self.data_path
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl Default for InitGuard {
    fn default() -> Self {
        Self::new()
    }
}
