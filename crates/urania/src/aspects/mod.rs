pub mod calculator;
pub mod types;

pub use calculator::{AspectCalculator, APPLYING_PROJECTION_DAYS};
pub use types::{Aspect, AspectCore, AspectType, OrbSettings};
