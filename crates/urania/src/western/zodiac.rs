//! Zodiac signs and longitude normalization.
//!
//! The ecliptic is partitioned into twelve 30° signs starting at 0° Aries.

use serde::{Deserialize, Serialize};
use std::fmt;

pub const SIGN_SPAN: f64 = 30.0;

/// Normalize a longitude into `[0, 360)`.
///
/// `rem_euclid` can round a tiny negative input up to exactly 360.0, which is
/// folded back to 0.0 so the half-open range always holds for finite input.
pub fn normalize_longitude(longitude: f64) -> f64 {
    let normalized = longitude.rem_euclid(360.0);
    if normalized >= 360.0 {
        0.0
    } else {
        normalized
    }
}

/// Shortest angular separation between two longitudes, in `[0, 180]`.
pub fn angular_separation(lon1: f64, lon2: f64) -> f64 {
    let raw_diff = (normalize_longitude(lon1) - normalize_longitude(lon2)).abs();
    if raw_diff > 180.0 {
        360.0 - raw_diff
    } else {
        raw_diff
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacSign {
    Aries,
    Taurus,
    Gemini,
    Cancer,
    Leo,
    Virgo,
    Libra,
    Scorpio,
    Sagittarius,
    Capricorn,
    Aquarius,
    Pisces,
}

impl ZodiacSign {
    pub const ALL: [ZodiacSign; 12] = [
        ZodiacSign::Aries,
        ZodiacSign::Taurus,
        ZodiacSign::Gemini,
        ZodiacSign::Cancer,
        ZodiacSign::Leo,
        ZodiacSign::Virgo,
        ZodiacSign::Libra,
        ZodiacSign::Scorpio,
        ZodiacSign::Sagittarius,
        ZodiacSign::Capricorn,
        ZodiacSign::Aquarius,
        ZodiacSign::Pisces,
    ];

    /// Sign containing the given longitude (any real value, normalized first).
    pub fn from_longitude(longitude: f64) -> Self {
        let index = (normalize_longitude(longitude) / SIGN_SPAN).floor() as usize;
        Self::from_index(index)
    }

    /// Sign at position `index` in zodiac order; wraps modulo 12.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % 12]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZodiacSign::Aries => "aries",
            ZodiacSign::Taurus => "taurus",
            ZodiacSign::Gemini => "gemini",
            ZodiacSign::Cancer => "cancer",
            ZodiacSign::Leo => "leo",
            ZodiacSign::Virgo => "virgo",
            ZodiacSign::Libra => "libra",
            ZodiacSign::Scorpio => "scorpio",
            ZodiacSign::Sagittarius => "sagittarius",
            ZodiacSign::Capricorn => "capricorn",
            ZodiacSign::Aquarius => "aquarius",
            ZodiacSign::Pisces => "pisces",
        }
    }

    /// Map a provider-supplied sign name. Accepts full names in any case and
    /// the common three-letter abbreviations.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = crate::ephemeris::naming::name_key(name);
        let sign = match key.as_str() {
            "aries" | "ari" => ZodiacSign::Aries,
            "taurus" | "tau" => ZodiacSign::Taurus,
            "gemini" | "gem" => ZodiacSign::Gemini,
            "cancer" | "can" => ZodiacSign::Cancer,
            "leo" => ZodiacSign::Leo,
            "virgo" | "vir" => ZodiacSign::Virgo,
            "libra" | "lib" => ZodiacSign::Libra,
            "scorpio" | "sco" => ZodiacSign::Scorpio,
            "sagittarius" | "sag" => ZodiacSign::Sagittarius,
            "capricorn" | "cap" => ZodiacSign::Capricorn,
            "aquarius" | "aqu" => ZodiacSign::Aquarius,
            "pisces" | "pis" => ZodiacSign::Pisces,
            _ => return None,
        };
        Some(sign)
    }
}

impl fmt::Display for ZodiacSign {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ZodiacSign::Aries => "Aries",
            ZodiacSign::Taurus => "Taurus",
            ZodiacSign::Gemini => "Gemini",
            ZodiacSign::Cancer => "Cancer",
            ZodiacSign::Leo => "Leo",
            ZodiacSign::Virgo => "Virgo",
            ZodiacSign::Libra => "Libra",
            ZodiacSign::Scorpio => "Scorpio",
            ZodiacSign::Sagittarius => "Sagittarius",
            ZodiacSign::Capricorn => "Capricorn",
            ZodiacSign::Aquarius => "Aquarius",
            ZodiacSign::Pisces => "Pisces",
        };
        write!(f, "{}", name)
    }
}
