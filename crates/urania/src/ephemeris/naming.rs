//! Provider name mapping.
//!
//! Providers name bodies, signs and aspects in their own way. Names are
//! matched case-insensitively with separators ignored; what happens to a
//! name that still does not match depends on the [`MappingPolicy`].

use crate::ephemeris::types::{ProviderResponse, RawChartData, RawCusp, RawPlanet};
use crate::western::bodies::CelestialBody;
use crate::western::zodiac::ZodiacSign;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// How unrecognized provider names are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingPolicy {
    /// Fail fast; for providers under the application's control
    #[default]
    Strict,
    /// Skip what cannot be mapped; for third-party providers
    Lenient,
}

impl MappingPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name_key(name).as_str() {
            "strict" => Some(MappingPolicy::Strict),
            "lenient" => Some(MappingPolicy::Lenient),
            _ => None,
        }
    }

    /// Apply the policy to a name that did not map
    pub fn unrecognized(self, kind: NameKind, name: &str) -> Result<(), MappingError> {
        match self {
            MappingPolicy::Strict => Err(MappingError::UnknownName {
                kind,
                name: name.to_string(),
            }),
            MappingPolicy::Lenient => {
                log::debug!("Skipping unrecognized {} name '{}'", kind, name);
                Ok(())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Planet,
    Sign,
    Aspect,
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let kind = match self {
            NameKind::Planet => "planet",
            NameKind::Sign => "sign",
            NameKind::Aspect => "aspect",
        };
        write!(f, "{}", kind)
    }
}

/// Errors raised while mapping a provider response into chart inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MappingError {
    #[error("Unrecognized {kind} name: '{name}'")]
    UnknownName { kind: NameKind, name: String },
    #[error("Provider listed {body} more than once")]
    DuplicateBody { body: CelestialBody },
    #[error("Provider reported sign '{reported}' for house {house}, but its cusp lies in {derived}")]
    SignMismatch {
        house: u8,
        reported: String,
        derived: ZodiacSign,
    },
    #[error("Provider value for {field} is not a finite number")]
    NonFinite { field: String },
}

/// Canonical lookup key: lowercase with whitespace, `_`, `-` and `.` removed
pub fn name_key(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '_' | '-' | '.'))
        .flat_map(char::to_lowercase)
        .collect()
}

fn ensure_finite(value: f64, field: impl FnOnce() -> String) -> Result<f64, MappingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(MappingError::NonFinite { field: field() })
    }
}

/// Map a provider response into typed chart inputs.
///
/// Non-finite numbers fail under either policy; they make the chart
/// structurally unusable rather than merely incomplete.
pub fn map_response(
    response: &ProviderResponse,
    policy: MappingPolicy,
) -> Result<RawChartData, MappingError> {
    let mut planets: Vec<RawPlanet> = Vec::with_capacity(response.planets.len());
    for entry in &response.planets {
        let Some(body) = CelestialBody::from_name(&entry.name) else {
            policy.unrecognized(NameKind::Planet, &entry.name)?;
            continue;
        };
        if planets.iter().any(|p| p.body == body) {
            match policy {
                MappingPolicy::Strict => return Err(MappingError::DuplicateBody { body }),
                MappingPolicy::Lenient => {
                    log::debug!("Skipping duplicate entry '{}' for {}", entry.name, body);
                    continue;
                }
            }
        }
        let longitude = ensure_finite(entry.longitude, || format!("{} longitude", entry.name))?;
        let latitude = ensure_finite(entry.latitude, || format!("{} latitude", entry.name))?;
        let speed = ensure_finite(entry.speed, || format!("{} speed", entry.name))?;
        planets.push(RawPlanet {
            body,
            longitude,
            latitude,
            retrograde: entry.retrograde.unwrap_or(false),
            speed,
        });
    }

    let mut cusps = Vec::with_capacity(response.cusps.len());
    for entry in &response.cusps {
        let longitude = ensure_finite(entry.longitude, || format!("house {} cusp", entry.number))?;
        if let Some(reported) = entry.sign.as_deref() {
            let derived = ZodiacSign::from_longitude(longitude);
            match ZodiacSign::from_name(reported) {
                Some(sign) if sign == derived => {}
                Some(_) => match policy {
                    MappingPolicy::Strict => {
                        return Err(MappingError::SignMismatch {
                            house: entry.number,
                            reported: reported.to_string(),
                            derived,
                        })
                    }
                    MappingPolicy::Lenient => log::warn!(
                        "House {} reported in '{}', using {} from its cusp",
                        entry.number,
                        reported,
                        derived
                    ),
                },
                None => policy.unrecognized(NameKind::Sign, reported)?,
            }
        }
        cusps.push(RawCusp {
            number: entry.number,
            longitude,
        });
    }

    let ascendant = response
        .ascendant
        .map(|v| ensure_finite(v, || "ascendant".to_string()))
        .transpose()?;
    let midheaven = response
        .midheaven
        .map(|v| ensure_finite(v, || "midheaven".to_string()))
        .transpose()?;

    Ok(RawChartData {
        planets,
        cusps,
        ascendant,
        midheaven,
    })
}
