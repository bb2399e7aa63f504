use crate::aspects::types::{Aspect, AspectCore, AspectType, OrbSettings};
use crate::western::types::Planet;
use crate::western::zodiac::{angular_separation, normalize_longitude};

/// How far ahead (days) positions are projected to judge applying/separating
pub const APPLYING_PROJECTION_DAYS: f64 = 0.01;

/// Projected deviations must shrink by more than this to count as applying
const DEVIATION_EPSILON: f64 = 1e-9;

/// Aspect calculator
pub struct AspectCalculator;

impl AspectCalculator {
    /// Create a new aspect calculator
    pub fn new() -> Self {
        Self
    }

    /// Compute aspects between every unordered pair of `planets`.
    ///
    /// Pairs with no qualifying aspect type are skipped, as are pairs of the
    /// same body.
    pub fn detect(&self, planets: &[Planet], orbs: &OrbSettings) -> Vec<Aspect> {
        let mut aspects = Vec::new();
        for i in 0..planets.len() {
            for j in (i + 1)..planets.len() {
                let p1 = &planets[i];
                let p2 = &planets[j];
                if p1.body == p2.body {
                    continue;
                }

                if let Some(core) =
                    self.calculate_aspect(p1.longitude, p2.longitude, p1.speed, p2.speed, orbs)
                {
                    aspects.push(Aspect {
                        planet1: p1.body,
                        planet2: p2.body,
                        aspect_type: core.aspect_type,
                        orb: core.orb,
                        applying: core.applying,
                    });
                }
            }
        }
        aspects
    }

    /// Classify the aspect between two longitudes using planet speeds
    pub fn calculate_aspect(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        orbs: &OrbSettings,
    ) -> Option<AspectCore> {
        let separation = angular_separation(lon1, lon2);

        for aspect_type in AspectType::ALL {
            let max_orb = orbs.effective_orb(aspect_type);
            let deviation = (separation - aspect_type.target_angle()).abs();

            if deviation <= max_orb {
                let applying = self.is_aspect_applying(
                    lon1,
                    lon2,
                    speed1,
                    speed2,
                    aspect_type.target_angle(),
                    deviation,
                );
                return Some(AspectCore {
                    aspect_type,
                    orb: deviation.min(max_orb),
                    applying,
                });
            }
        }

        None
    }

    /// Determine if an aspect is applying (approaching exact) or separating
    fn is_aspect_applying(
        &self,
        lon1: f64,
        lon2: f64,
        speed1: f64,
        speed2: f64,
        aspect_angle: f64,
        current_deviation: f64,
    ) -> bool {
        let future1 = normalize_longitude(lon1 + speed1 * APPLYING_PROJECTION_DAYS);
        let future2 = normalize_longitude(lon2 + speed2 * APPLYING_PROJECTION_DAYS);
        let future_deviation = (angular_separation(future1, future2) - aspect_angle).abs();

        future_deviation + DEVIATION_EPSILON < current_deviation
    }
}

impl Default for AspectCalculator {
    fn default() -> Self {
        Self::new()
    }
}
