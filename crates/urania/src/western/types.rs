//! Chart point types shared by the western modules.

use crate::western::bodies::CelestialBody;
use crate::western::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};

/// A body placed in the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    #[serde(rename = "id")]
    pub body: CelestialBody,
    /// Ecliptic longitude in degrees, `[0, 360)`
    pub longitude: f64,
    /// Ecliptic latitude in degrees
    pub latitude: f64,
    pub sign: ZodiacSign,
    /// House number, 1-12
    pub house: u8,
    pub retrograde: bool,
    /// Speed in longitude (degrees per day); negative while retrograde
    pub speed: f64,
}
