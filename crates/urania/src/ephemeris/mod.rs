pub mod naming;
pub mod provider;
pub mod recorded;
pub mod types;

#[cfg(feature = "swisseph")]
pub mod adapter;

#[cfg(feature = "swisseph")]
pub use adapter::SwissEphemerisAdapter;
pub use naming::{map_response, name_key, MappingError, MappingPolicy, NameKind};
pub use provider::{EphemerisError, InitGuard, PositionProvider};
pub use recorded::RecordedProvider;
pub use types::{ProviderCusp, ProviderPlanet, ProviderResponse, RawChartData, RawCusp, RawPlanet};
