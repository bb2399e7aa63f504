//! Caller-supplied birth data.

use crate::time::{to_utc_instant, TimeError};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BirthDataError {
    #[error("Latitude {0} is outside [-90, 90]")]
    InvalidLatitude(f64),
    #[error("Longitude {0} is outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// Geographic location coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinate {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, BirthDataError> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<(), BirthDataError> {
        if !(self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude)) {
            return Err(BirthDataError::InvalidLatitude(self.latitude));
        }
        if !(self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude)) {
            return Err(BirthDataError::InvalidLongitude(self.longitude));
        }
        Ok(())
    }

    /// True when both components differ by at most `tolerance` degrees.
    /// Longitude difference is taken across the antimeridian.
    pub fn within(&self, other: &GeoCoordinate, tolerance: f64) -> bool {
        let lat_diff = (self.latitude - other.latitude).abs();
        let raw_lon_diff = (self.longitude - other.longitude).abs();
        let lon_diff = raw_lon_diff.min(360.0 - raw_lon_diff);
        lat_diff <= tolerance && lon_diff <= tolerance
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthDetails {
    pub name: String,
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    /// Free-text place of birth
    pub location: String,
    /// IANA timezone identifier, e.g. `Europe/Kyiv`
    pub timezone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinate: Option<GeoCoordinate>,
}

impl BirthDetails {
    pub fn new(
        name: impl Into<String>,
        birth_date: NaiveDate,
        birth_time: NaiveTime,
        location: impl Into<String>,
        timezone: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            birth_date,
            birth_time,
            location: location.into(),
            timezone: timezone.into(),
            coordinate: None,
        }
    }

    pub fn with_coordinate(mut self, coordinate: GeoCoordinate) -> Self {
        self.coordinate = Some(coordinate);
        self
    }

    pub fn validate(&self) -> Result<(), BirthDataError> {
        match &self.coordinate {
            Some(coordinate) => coordinate.validate(),
            None => Ok(()),
        }
    }

    /// Absolute birth instant
    pub fn utc_instant(&self) -> Result<DateTime<Utc>, TimeError> {
        to_utc_instant(self.birth_date, self.birth_time, &self.timezone)
    }
}
