use crate::western::bodies::CelestialBody;
use serde::{Deserialize, Serialize};

/// Planet entry as a provider reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderPlanet {
    #[serde(alias = "id", alias = "planet")]
    pub name: String,
    /// Longitude in degrees
    #[serde(alias = "lon", alias = "full_degree", alias = "fullDegree")]
    pub longitude: f64,
    /// Latitude in degrees
    #[serde(default, alias = "lat")]
    pub latitude: f64,
    /// Explicit retrograde flag, when the provider supplies one
    #[serde(default, alias = "is_retro", alias = "isRetro")]
    pub retrograde: Option<bool>,
    /// Speed in longitude (degrees per day)
    #[serde(default, alias = "speed_lon", alias = "longitudeSpeed")]
    pub speed: f64,
}

/// House cusp entry as a provider reports it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderCusp {
    #[serde(alias = "house")]
    pub number: u8,
    #[serde(alias = "cusp", alias = "degree")]
    pub longitude: f64,
    #[serde(default)]
    pub sign: Option<String>,
}

/// Complete provider answer for one instant and location
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderResponse {
    #[serde(default)]
    pub planets: Vec<ProviderPlanet>,
    #[serde(default, alias = "houses")]
    pub cusps: Vec<ProviderCusp>,
    #[serde(default, alias = "asc")]
    pub ascendant: Option<f64>,
    #[serde(default, alias = "mc")]
    pub midheaven: Option<f64>,
}

/// Planetary position data after name mapping
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlanet {
    pub body: CelestialBody,
    pub longitude: f64,
    pub latitude: f64,
    pub retrograde: bool,
    pub speed: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawCusp {
    pub number: u8,
    pub longitude: f64,
}

/// Typed chart inputs: positions, cusps and optional dedicated angles
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChartData {
    pub planets: Vec<RawPlanet>,
    pub cusps: Vec<RawCusp>,
    pub ascendant: Option<f64>,
    pub midheaven: Option<f64>,
}
