use crate::ephemeris::naming::{MappingError, MappingPolicy, NameKind};
use crate::western::bodies::CelestialBody;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Major aspect types, in ascending order of target angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    /// Detection order: first match wins
    pub const ALL: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    /// Exact angle for this aspect (0, 60, 90, 120, 180)
    pub fn target_angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Largest orb this type ever accepts
    pub fn max_orb(self) -> f64 {
        match self {
            AspectType::Conjunction => 8.0,
            AspectType::Sextile => 6.0,
            AspectType::Square => 7.0,
            AspectType::Trine => 8.0,
            AspectType::Opposition => 8.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let key = crate::ephemeris::naming::name_key(name);
        let aspect = match key.as_str() {
            "conjunction" | "conj" | "con" => AspectType::Conjunction,
            "sextile" | "sext" | "sex" => AspectType::Sextile,
            "square" | "sqr" | "quadrature" => AspectType::Square,
            "trine" | "tri" => AspectType::Trine,
            "opposition" | "opp" => AspectType::Opposition,
            _ => return None,
        };
        Some(aspect)
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Sextile => "Sextile",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Opposition => "Opposition",
        };
        write!(f, "{}", name)
    }
}

/// Per-invocation orb overrides. An override can only narrow the type's
/// maximum orb; wider values are clamped to it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrbSettings {
    overrides: HashMap<AspectType, f64>,
}

impl OrbSettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orb(mut self, aspect_type: AspectType, orb: f64) -> Self {
        self.set_orb(aspect_type, orb);
        self
    }

    pub fn set_orb(&mut self, aspect_type: AspectType, orb: f64) {
        self.overrides.insert(aspect_type, orb);
    }

    /// Orb actually applied for `aspect_type`
    pub fn effective_orb(&self, aspect_type: AspectType) -> f64 {
        let max = aspect_type.max_orb();
        match self.overrides.get(&aspect_type) {
            Some(orb) if orb.is_finite() => orb.clamp(0.0, max),
            _ => max,
        }
    }

    /// Build overrides from name-keyed orbs (e.g. a config table).
    ///
    /// Unknown aspect names fail under [`MappingPolicy::Strict`] and are
    /// skipped under [`MappingPolicy::Lenient`].
    pub fn from_names(
        orbs: &HashMap<String, f64>,
        policy: MappingPolicy,
    ) -> Result<Self, MappingError> {
        let mut settings = Self::new();
        for (name, orb) in orbs {
            match AspectType::from_name(name) {
                Some(aspect_type) => settings.set_orb(aspect_type, *orb),
                None => policy.unrecognized(NameKind::Aspect, name)?,
            }
        }
        Ok(settings)
    }
}

/// Classification of a single pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectCore {
    pub aspect_type: AspectType,
    /// Deviation from the exact angle, never above the effective orb
    pub orb: f64,
    /// Whether the aspect is applying (approaching exact)
    pub applying: bool,
}

impl AspectCore {
    pub fn exact_angle(&self) -> f64 {
        self.aspect_type.target_angle()
    }
}

/// An aspect between two chart bodies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub planet1: CelestialBody,
    pub planet2: CelestialBody,
    #[serde(rename = "type")]
    pub aspect_type: AspectType,
    pub orb: f64,
    pub applying: bool,
}

impl Aspect {
    /// True if this aspect joins `a` and `b` in either order
    pub fn involves_pair(&self, a: CelestialBody, b: CelestialBody) -> bool {
        (self.planet1 == a && self.planet2 == b) || (self.planet1 == b && self.planet2 == a)
    }
}
