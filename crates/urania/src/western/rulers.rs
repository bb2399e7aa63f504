//! Sign rulers for Western astrology.
//!
//! Maps zodiac signs to their planetary rulers (traditional and modern) and
//! resolves the ruler of each house cusp against the chart's planets.

use crate::western::bodies::CelestialBody;
use crate::western::houses::House;
use crate::western::types::Planet;
use crate::western::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rulership {
    #[default]
    Traditional,
    /// Outer planets take Scorpio, Aquarius and Pisces
    Modern,
}

/// Get sign ruler
pub fn sign_ruler(sign: ZodiacSign, rulership: Rulership) -> CelestialBody {
    match (sign, rulership) {
        (ZodiacSign::Aries, _) => CelestialBody::Mars,
        (ZodiacSign::Taurus, _) => CelestialBody::Venus,
        (ZodiacSign::Gemini, _) => CelestialBody::Mercury,
        (ZodiacSign::Cancer, _) => CelestialBody::Moon,
        (ZodiacSign::Leo, _) => CelestialBody::Sun,
        (ZodiacSign::Virgo, _) => CelestialBody::Mercury,
        (ZodiacSign::Libra, _) => CelestialBody::Venus,
        (ZodiacSign::Scorpio, Rulership::Traditional) => CelestialBody::Mars,
        (ZodiacSign::Scorpio, Rulership::Modern) => CelestialBody::Pluto,
        (ZodiacSign::Sagittarius, _) => CelestialBody::Jupiter,
        (ZodiacSign::Capricorn, _) => CelestialBody::Saturn,
        (ZodiacSign::Aquarius, Rulership::Traditional) => CelestialBody::Saturn,
        (ZodiacSign::Aquarius, Rulership::Modern) => CelestialBody::Uranus,
        (ZodiacSign::Pisces, Rulership::Traditional) => CelestialBody::Jupiter,
        (ZodiacSign::Pisces, Rulership::Modern) => CelestialBody::Neptune,
    }
}

/// Get sign ruler from longitude
pub fn sign_ruler_from_longitude(longitude: f64, rulership: Rulership) -> CelestialBody {
    sign_ruler(ZodiacSign::from_longitude(longitude), rulership)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseRuler {
    pub house_number: u8,
    pub ruling_planet: CelestialBody,
    pub ruler_sign: ZodiacSign,
    pub ruler_house: u8,
    pub ruler_longitude: f64,
}

/// Traditional ruler of every house cusp, with the ruler's placement.
///
/// Houses whose ruler is missing from `planets` are left out.
pub fn resolve_house_rulers(houses: &[House], planets: &[Planet]) -> Vec<HouseRuler> {
    let mut ordered: Vec<&House> = houses.iter().collect();
    ordered.sort_by_key(|h| h.number);

    ordered
        .into_iter()
        .filter_map(|house| {
            let ruler = sign_ruler(house.sign, Rulership::Traditional);
            let placement = planets.iter().find(|p| p.body == ruler)?;
            Some(HouseRuler {
                house_number: house.number,
                ruling_planet: ruler,
                ruler_sign: placement.sign,
                ruler_house: placement.house,
                ruler_longitude: placement.longitude,
            })
        })
        .collect()
}
