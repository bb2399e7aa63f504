use crate::aspects::Aspect;
use crate::birth::BirthDetails;
use crate::cache::CacheError;
use crate::chart::NatalChart;
use crate::western::{resolve_house_rulers, House, Planet};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted form of a cached chart.
///
/// Planets, houses and aspects are stored as separate JSON blobs so each can
/// be inspected or reused alone. House rulers are not stored; they are derived
/// again from the planets and houses when the chart is rebuilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedChartRecord {
    pub fingerprint_key: String,
    /// Snapshot used to test fingerprint matches
    pub birth_details: BirthDetails,
    pub planets_json: String,
    pub houses_json: String,
    pub aspects_json: String,
    pub ascendant: f64,
    pub midheaven: f64,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<String>,
}

impl CachedChartRecord {
    pub fn from_chart(
        chart: &NatalChart,
        details: &BirthDetails,
        fingerprint_key: &str,
    ) -> Result<Self, CacheError> {
        Ok(Self {
            fingerprint_key: fingerprint_key.to_string(),
            birth_details: details.clone(),
            planets_json: encode_blob("planets", &chart.planets)?,
            houses_json: encode_blob("houses", &chart.houses)?,
            aspects_json: encode_blob("aspects", &chart.aspects)?,
            ascendant: chart.ascendant,
            midheaven: chart.midheaven,
            generated_at: chart.calculated_at,
            image_reference: chart.image_reference.clone(),
        })
    }

    pub fn planets(&self) -> Result<Vec<Planet>, CacheError> {
        decode_blob(&self.fingerprint_key, "planets", &self.planets_json)
    }

    pub fn houses(&self) -> Result<Vec<House>, CacheError> {
        decode_blob(&self.fingerprint_key, "houses", &self.houses_json)
    }

    pub fn aspects(&self) -> Result<Vec<Aspect>, CacheError> {
        decode_blob(&self.fingerprint_key, "aspects", &self.aspects_json)
    }

    /// Rebuild the chart this record was saved from
    pub fn to_chart(&self) -> Result<NatalChart, CacheError> {
        let coordinate =
            self.birth_details
                .coordinate
                .ok_or_else(|| CacheError::Decode {
                    location: self.fingerprint_key.clone(),
                    message: "record has no birth coordinate".to_string(),
                })?;
        let planets = self.planets()?;
        let houses = self.houses()?;
        let aspects = self.aspects()?;
        let house_rulers = resolve_house_rulers(&houses, &planets);

        Ok(NatalChart {
            birth_date: self.birth_details.birth_date,
            birth_time: self.birth_details.birth_time,
            latitude: coordinate.latitude,
            longitude: coordinate.longitude,
            location_name: self.birth_details.location.clone(),
            planets,
            houses,
            aspects,
            house_rulers,
            ascendant: self.ascendant,
            midheaven: self.midheaven,
            calculated_at: self.generated_at,
            image_reference: self.image_reference.clone(),
        })
    }
}

fn encode_blob<T: Serialize>(part: &str, value: &T) -> Result<String, CacheError> {
    serde_json::to_string(value).map_err(|e| CacheError::Encode {
        part: part.to_string(),
        message: e.to_string(),
    })
}

fn decode_blob<T: for<'de> Deserialize<'de>>(
    key: &str,
    part: &str,
    json: &str,
) -> Result<T, CacheError> {
    serde_json::from_str(json).map_err(|e| CacheError::Decode {
        location: format!("{} ({})", key, part),
        message: e.to_string(),
    })
}
