use serde::{Deserialize, Serialize};
use std::fmt;

/// Bodies a chart may contain. The first ten are the classical set every
/// provider is expected to supply; nodes, Lilith and Chiron are optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CelestialBody {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
    NorthNode,
    SouthNode,
    Lilith,
    Chiron,
}

impl CelestialBody {
    pub const CLASSICAL: [CelestialBody; 10] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
    ];

    pub const ALL: [CelestialBody; 14] = [
        CelestialBody::Sun,
        CelestialBody::Moon,
        CelestialBody::Mercury,
        CelestialBody::Venus,
        CelestialBody::Mars,
        CelestialBody::Jupiter,
        CelestialBody::Saturn,
        CelestialBody::Uranus,
        CelestialBody::Neptune,
        CelestialBody::Pluto,
        CelestialBody::NorthNode,
        CelestialBody::SouthNode,
        CelestialBody::Lilith,
        CelestialBody::Chiron,
    ];

    pub fn is_classical(self) -> bool {
        Self::CLASSICAL.contains(&self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CelestialBody::Sun => "sun",
            CelestialBody::Moon => "moon",
            CelestialBody::Mercury => "mercury",
            CelestialBody::Venus => "venus",
            CelestialBody::Mars => "mars",
            CelestialBody::Jupiter => "jupiter",
            CelestialBody::Saturn => "saturn",
            CelestialBody::Uranus => "uranus",
            CelestialBody::Neptune => "neptune",
            CelestialBody::Pluto => "pluto",
            CelestialBody::NorthNode => "north_node",
            CelestialBody::SouthNode => "south_node",
            CelestialBody::Lilith => "lilith",
            CelestialBody::Chiron => "chiron",
        }
    }

    /// Map a provider-supplied body name. Case, whitespace, dashes and
    /// underscores are ignored; common node and Lilith aliases are accepted.
    pub fn from_name(name: &str) -> Option<Self> {
        let key = crate::ephemeris::naming::name_key(name);
        let body = match key.as_str() {
            "sun" => CelestialBody::Sun,
            "moon" => CelestialBody::Moon,
            "mercury" => CelestialBody::Mercury,
            "venus" => CelestialBody::Venus,
            "mars" => CelestialBody::Mars,
            "jupiter" => CelestialBody::Jupiter,
            "saturn" => CelestialBody::Saturn,
            "uranus" => CelestialBody::Uranus,
            "neptune" => CelestialBody::Neptune,
            "pluto" => CelestialBody::Pluto,
            "northnode" | "truenode" | "meannode" | "node" | "rahu" => CelestialBody::NorthNode,
            "southnode" | "ketu" => CelestialBody::SouthNode,
            "lilith" | "blackmoonlilith" | "meanlilith" | "meanapogee" => CelestialBody::Lilith,
            "chiron" => CelestialBody::Chiron,
            _ => return None,
        };
        Some(body)
    }
}

impl fmt::Display for CelestialBody {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            CelestialBody::Sun => "Sun",
            CelestialBody::Moon => "Moon",
            CelestialBody::Mercury => "Mercury",
            CelestialBody::Venus => "Venus",
            CelestialBody::Mars => "Mars",
            CelestialBody::Jupiter => "Jupiter",
            CelestialBody::Saturn => "Saturn",
            CelestialBody::Uranus => "Uranus",
            CelestialBody::Neptune => "Neptune",
            CelestialBody::Pluto => "Pluto",
            CelestialBody::NorthNode => "North Node",
            CelestialBody::SouthNode => "South Node",
            CelestialBody::Lilith => "Lilith",
            CelestialBody::Chiron => "Chiron",
        };
        write!(f, "{}", name)
    }
}
