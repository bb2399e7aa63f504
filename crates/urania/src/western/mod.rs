pub mod bodies;
pub mod houses;
pub mod rulers;
pub mod types;
pub mod zodiac;

pub use bodies::CelestialBody;
pub use houses::{assign_house, validate_houses, House, HouseError, HouseTable, HOUSE_COUNT};
pub use rulers::{resolve_house_rulers, sign_ruler, sign_ruler_from_longitude, HouseRuler, Rulership};
pub use types::Planet;
pub use zodiac::{angular_separation, normalize_longitude, ZodiacSign};
