use crate::aspects::Aspect;
use crate::western::{CelestialBody, House, HouseRuler, Planet};
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A computed natal chart. Built once by the assembler (or rebuilt from the
/// cache) and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatalChart {
    pub birth_date: NaiveDate,
    pub birth_time: NaiveTime,
    pub latitude: f64,
    pub longitude: f64,
    pub location_name: String,
    pub planets: Vec<Planet>,
    /// Houses 1-12 in order
    pub houses: Vec<House>,
    pub aspects: Vec<Aspect>,
    pub house_rulers: Vec<HouseRuler>,
    pub ascendant: f64,
    pub midheaven: f64,
    pub calculated_at: DateTime<Utc>,
    /// Opaque reference to a rendered chart image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_reference: Option<String>,
}

impl NatalChart {
    pub fn planet(&self, body: CelestialBody) -> Option<&Planet> {
        self.planets.iter().find(|p| p.body == body)
    }

    pub fn house(&self, number: u8) -> Option<&House> {
        self.houses.iter().find(|h| h.number == number)
    }

    /// Aspects that involve `body` on either side
    pub fn aspects_of(&self, body: CelestialBody) -> impl Iterator<Item = &Aspect> {
        self.aspects
            .iter()
            .filter(move |a| a.planet1 == body || a.planet2 == body)
    }

    pub fn aspect_between(&self, a: CelestialBody, b: CelestialBody) -> Option<&Aspect> {
        self.aspects.iter().find(|aspect| aspect.involves_pair(a, b))
    }

    pub fn ruler_of(&self, house_number: u8) -> Option<&HouseRuler> {
        self.house_rulers
            .iter()
            .find(|r| r.house_number == house_number)
    }

    /// Copy of this chart carrying an image reference from the renderer
    pub fn with_image_reference(mut self, reference: impl Into<String>) -> Self {
        self.image_reference = Some(reference.into());
        self
    }
}
