//! House cusps and planet-to-house assignment.
//!
//! A house owns the half-open arc from its own cusp forward to the next
//! house's cusp, with house 12 wrapping back to house 1. Exactly twelve
//! houses are required for the arcs to cover the circle.

use crate::western::zodiac::{normalize_longitude, ZodiacSign};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const HOUSE_COUNT: usize = 12;

/// Errors raised for structurally invalid house data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HouseError {
    #[error("Malformed house data: expected 12 houses, got {count}")]
    WrongCount { count: usize },
    #[error("Malformed house data: house number {number} is outside 1-12")]
    InvalidNumber { number: u8 },
    #[error("Malformed house data: house {number} appears more than once")]
    DuplicateNumber { number: u8 },
    #[error("Malformed house data: cusp of house {number} is not a finite longitude")]
    NonFiniteCusp { number: u8 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct House {
    pub number: u8,
    /// Cusp longitude in degrees, `[0, 360)`
    pub cusp: f64,
    pub sign: ZodiacSign,
}

impl House {
    /// Build a house from a raw cusp; the longitude is normalized and the
    /// sign derived from it.
    pub fn new(number: u8, cusp: f64) -> Self {
        let cusp = normalize_longitude(cusp);
        Self {
            number,
            cusp,
            sign: ZodiacSign::from_longitude(cusp),
        }
    }
}

/// Check that `houses` holds houses 1..=12 exactly once each with finite cusps.
pub fn validate_houses(houses: &[House]) -> Result<(), HouseError> {
    if houses.len() != HOUSE_COUNT {
        return Err(HouseError::WrongCount {
            count: houses.len(),
        });
    }
    let mut seen = [false; HOUSE_COUNT];
    for house in houses {
        if !(1..=HOUSE_COUNT as u8).contains(&house.number) {
            return Err(HouseError::InvalidNumber {
                number: house.number,
            });
        }
        let slot = &mut seen[(house.number - 1) as usize];
        if *slot {
            return Err(HouseError::DuplicateNumber {
                number: house.number,
            });
        }
        *slot = true;
        if !house.cusp.is_finite() {
            return Err(HouseError::NonFiniteCusp {
                number: house.number,
            });
        }
    }
    Ok(())
}

/// Validated, number-ordered cusp table for repeated assignment.
#[derive(Debug, Clone)]
pub struct HouseTable {
    cusps: [f64; HOUSE_COUNT],
}

impl HouseTable {
    pub fn new(houses: &[House]) -> Result<Self, HouseError> {
        validate_houses(houses)?;
        let mut cusps = [0.0; HOUSE_COUNT];
        for house in houses {
            cusps[(house.number - 1) as usize] = normalize_longitude(house.cusp);
        }
        Ok(Self { cusps })
    }

    pub fn cusp(&self, number: u8) -> Option<f64> {
        self.cusps.get((number as usize).checked_sub(1)?).copied()
    }

    /// House number (1-12) whose arc contains `longitude`.
    ///
    /// Degenerate tables (two houses sharing a cusp) can leave a longitude
    /// uncovered; such longitudes fall back to house 1.
    pub fn assign(&self, longitude: f64) -> u8 {
        let lon = normalize_longitude(longitude);
        for i in 0..HOUSE_COUNT {
            let start = self.cusps[i];
            let end = self.cusps[(i + 1) % HOUSE_COUNT];
            let contains = if start <= end {
                lon >= start && lon < end
            } else {
                // Arc crosses 0°/360°
                lon >= start || lon < end
            };
            if contains {
                return (i + 1) as u8;
            }
        }
        1
    }
}

/// Assign `longitude` to one of the given twelve houses.
pub fn assign_house(houses: &[House], longitude: f64) -> Result<u8, HouseError> {
    Ok(HouseTable::new(houses)?.assign(longitude))
}
