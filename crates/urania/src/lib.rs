//! Natal chart calculation and caching.
//!
//! Raw positions from a [`PositionProvider`] are mapped, placed into houses,
//! checked for aspects and house rulers, and assembled into an immutable
//! [`NatalChart`]. A [`ChartCache`] keyed by birth-detail fingerprints serves
//! previously computed charts without asking the provider again.

pub mod aspects;
pub mod birth;
pub mod cache;
pub mod chart;
pub mod ephemeris;
pub mod time;
pub mod western;

pub use aspects::{Aspect, AspectCalculator, AspectType, OrbSettings};
pub use birth::{BirthDataError, BirthDetails, GeoCoordinate};
pub use cache::{
    BirthFingerprint, CacheError, ChartCache, ChartStore, FileChartStore, MemoryChartStore,
};
pub use chart::{
    assemble_chart, assemble_chart_with_orbs, ChartEngine, ChartError, ChartOutcome, ChartSource,
    NatalChart,
};
pub use ephemeris::{
    map_response, EphemerisError, InitGuard, MappingError, MappingPolicy, PositionProvider,
    ProviderResponse, RawChartData, RecordedProvider,
};
pub use time::{resolve_timezone, to_utc_instant, TimeError};
pub use western::{CelestialBody, House, HouseError, HouseRuler, Planet, ZodiacSign};

#[cfg(feature = "swisseph")]
pub use ephemeris::SwissEphemerisAdapter;
