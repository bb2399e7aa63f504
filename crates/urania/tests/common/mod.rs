#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use urania::ephemeris::{RawChartData, RawCusp, RawPlanet};
use urania::western::House;
use urania::{BirthDetails, CelestialBody, GeoCoordinate};

/// Cusps of houses 1-12; house 12 wraps across 0°
pub const CUSPS: [f64; 12] = [
    2.4, 31.0, 58.7, 90.0, 122.3, 155.0, 182.4, 211.0, 241.3, 270.0, 301.5, 333.0,
];

pub fn kyiv_details() -> BirthDetails {
    BirthDetails::new(
        "Olena",
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        "Kyiv, Ukraine",
        "UTC",
    )
    .with_coordinate(GeoCoordinate::new(50.45, 30.52).unwrap())
}

pub fn houses() -> Vec<House> {
    CUSPS
        .iter()
        .enumerate()
        .map(|(i, cusp)| House::new((i + 1) as u8, *cusp))
        .collect()
}

fn raw_planet(body: CelestialBody, longitude: f64, speed: f64) -> RawPlanet {
    RawPlanet {
        body,
        longitude,
        latitude: 0.0,
        retrograde: false,
        speed,
    }
}

pub fn raw_chart() -> RawChartData {
    RawChartData {
        planets: vec![
            raw_planet(CelestialBody::Sun, 280.0, 1.019),
            raw_planet(CelestialBody::Moon, 40.0, 13.2),
            raw_planet(CelestialBody::Mercury, 265.5, -0.5),
            raw_planet(CelestialBody::Venus, 310.2, 1.2),
            raw_planet(CelestialBody::Mars, 355.0, 0.7),
            raw_planet(CelestialBody::Jupiter, 1.0, 0.1),
            raw_planet(CelestialBody::Saturn, 300.0, 0.12),
            raw_planet(CelestialBody::NorthNode, 100.0, -0.05),
        ],
        cusps: CUSPS
            .iter()
            .enumerate()
            .map(|(i, cusp)| RawCusp {
                number: (i + 1) as u8,
                longitude: *cusp,
            })
            .collect(),
        ascendant: None,
        midheaven: None,
    }
}

/// Third-party style payload for the same sky, with one body the engine
/// does not know about
pub const THIRD_PARTY_JSON: &str = r#"
{
  "planets": [
    { "name": "Sun", "fullDegree": 280.0, "speed": 1.019, "isRetro": false },
    { "name": "Moon", "fullDegree": 40.0, "speed": 13.2 },
    { "name": "Mercury", "fullDegree": 265.5, "speed": -0.5, "isRetro": true },
    { "name": "Venus", "fullDegree": 310.2, "speed": 1.2 },
    { "name": "Mars", "fullDegree": 355.0, "speed": 0.7 },
    { "name": "Jupiter", "fullDegree": 1.0, "speed": 0.1 },
    { "name": "Saturn", "fullDegree": 300.0, "speed": 0.12 },
    { "name": "Ceres", "fullDegree": 12.0, "speed": 0.3 },
    { "name": "True Node", "fullDegree": 100.0, "speed": -0.05 }
  ],
  "houses": [
    { "house": 1, "degree": 2.4, "sign": "Aries" },
    { "house": 2, "degree": 31.0, "sign": "Taurus" },
    { "house": 3, "degree": 58.7, "sign": "Gemini" },
    { "house": 4, "degree": 90.0, "sign": "Cancer" },
    { "house": 5, "degree": 122.3, "sign": "Leo" },
    { "house": 6, "degree": 155.0, "sign": "Virgo" },
    { "house": 7, "degree": 182.4, "sign": "Libra" },
    { "house": 8, "degree": 211.0, "sign": "Scorpio" },
    { "house": 9, "degree": 241.3, "sign": "Sagittarius" },
    { "house": 10, "degree": 270.0, "sign": "Capricorn" },
    { "house": 11, "degree": 301.5, "sign": "Aquarius" },
    { "house": 12, "degree": 333.0, "sign": "Pisces" }
  ],
  "ascendant": 2.4,
  "midheaven": 270.0
}
"#;
