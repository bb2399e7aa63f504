pub mod assembler;
pub mod engine;
pub mod natal;

pub use assembler::{assemble_chart, assemble_chart_with_orbs};
pub use engine::{ChartEngine, ChartOutcome, ChartSource};
pub use natal::NatalChart;

use crate::birth::BirthDataError;
use crate::cache::CacheError;
use crate::ephemeris::{EphemerisError, MappingError};
use crate::time::TimeError;
use crate::western::{CelestialBody, HouseError};
use thiserror::Error;

/// Errors that abort chart generation
#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    BirthData(#[from] BirthDataError),
    #[error("Birth details have no coordinate; houses cannot be computed")]
    MissingCoordinate,
    #[error(transparent)]
    Time(#[from] TimeError),
    #[error(transparent)]
    Houses(#[from] HouseError),
    #[error(transparent)]
    Mapping(#[from] MappingError),
    #[error("Position of {body} is not a finite longitude")]
    InvalidPosition { body: CelestialBody },
    #[error(transparent)]
    Provider(#[from] EphemerisError),
    #[error(transparent)]
    Cache(#[from] CacheError),
}
