use crate::birth::GeoCoordinate;
use crate::ephemeris::naming::MappingPolicy;
use crate::ephemeris::provider::{EphemerisError, PositionProvider};
use crate::ephemeris::types::ProviderResponse;
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;

/// Replays a stored third-party response.
///
/// The response is returned as-is whatever instant or location is asked for,
/// so names go through the lenient policy like any third-party payload.
#[derive(Debug, Clone)]
pub struct RecordedProvider {
    source_name: String,
    response: ProviderResponse,
}

impl RecordedProvider {
    pub fn new(source_name: impl Into<String>, response: ProviderResponse) -> Self {
        Self {
            source_name: source_name.into(),
            response,
        }
    }

    pub fn from_json_str(source_name: &str, json: &str) -> Result<Self, EphemerisError> {
        let response: ProviderResponse =
            serde_json::from_str(json).map_err(|e| EphemerisError::InvalidResponse {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;
        Ok(Self::new(source_name, response))
    }

    pub fn from_json_file(path: &Path) -> Result<Self, EphemerisError> {
        let json = fs::read_to_string(path).map_err(|e| EphemerisError::FileNotFound {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json_str(&path.display().to_string(), &json)
    }

    pub fn response(&self) -> &ProviderResponse {
        &self.response
    }
}

impl PositionProvider for RecordedProvider {
    fn name(&self) -> &str {
        &self.source_name
    }

    fn mapping_policy(&self) -> MappingPolicy {
        MappingPolicy::Lenient
    }

    fn positions(
        &self,
        instant: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<ProviderResponse, EphemerisError> {
        log::debug!(
            "Replaying recorded positions from {} for {} at ({}, {})",
            self.source_name,
            instant,
            location.latitude,
            location.longitude
        );
        Ok(self.response.clone())
    }
}
