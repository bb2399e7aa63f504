use crate::aspects::OrbSettings;
use crate::birth::BirthDetails;
use crate::cache::{ChartCache, ChartStore};
use crate::chart::assembler::assemble_chart_with_orbs;
use crate::chart::natal::NatalChart;
use crate::chart::ChartError;
use crate::ephemeris::{map_response, PositionProvider};
use chrono::Utc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartSource {
    Cache,
    Computed,
}

#[derive(Debug, Clone)]
pub struct ChartOutcome {
    pub chart: NatalChart,
    pub source: ChartSource,
}

/// Serves charts from the cache when possible and computes them through the
/// provider otherwise.
pub struct ChartEngine<P, S: ChartStore> {
    provider: P,
    cache: Option<ChartCache<S>>,
    orbs: OrbSettings,
}

impl<P: PositionProvider, S: ChartStore> ChartEngine<P, S> {
    pub fn new(provider: P, cache: Option<ChartCache<S>>) -> Self {
        Self {
            provider,
            cache,
            orbs: OrbSettings::default(),
        }
    }

    pub fn with_orbs(mut self, orbs: OrbSettings) -> Self {
        self.orbs = orbs;
        self
    }

    pub fn cache(&self) -> Option<&ChartCache<S>> {
        self.cache.as_ref()
    }

    /// Chart for `details`. With `regenerate` set the cache is not consulted
    /// and the freshly computed chart overwrites any cached one.
    ///
    /// Cache failures are logged and never fail generation. An unreadable
    /// entry is treated as a miss and overwritten by the computed chart.
    pub fn generate(
        &self,
        details: &BirthDetails,
        regenerate: bool,
    ) -> Result<ChartOutcome, ChartError> {
        details.validate()?;

        if !regenerate {
            if let Some(cache) = &self.cache {
                match cache.find(details) {
                    Ok(Some(chart)) => {
                        log::info!("Serving cached chart for '{}'", details.name);
                        return Ok(ChartOutcome {
                            chart,
                            source: ChartSource::Cache,
                        });
                    }
                    Ok(None) => {}
                    Err(e) => log::warn!(
                        "Ignoring unreadable cache entry for '{}': {}",
                        details.name,
                        e
                    ),
                }
            }
        }

        let coordinate = details.coordinate.ok_or(ChartError::MissingCoordinate)?;
        let instant = details.utc_instant()?;
        log::info!(
            "Requesting positions from {} for {} at ({:.4}, {:.4})",
            self.provider.name(),
            instant,
            coordinate.latitude,
            coordinate.longitude
        );
        let response = self.provider.positions(instant, coordinate)?;
        let raw = map_response(&response, self.provider.mapping_policy())?;
        if raw.planets.len() < response.planets.len() {
            log::warn!(
                "{} of {} provider planets could not be mapped and were dropped",
                response.planets.len() - raw.planets.len(),
                response.planets.len()
            );
        }

        let chart = assemble_chart_with_orbs(details, &raw, Utc::now(), &self.orbs)?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.save(&chart, details) {
                log::warn!("Could not cache chart for '{}': {}", details.name, e);
            }
        }

        Ok(ChartOutcome {
            chart,
            source: ChartSource::Computed,
        })
    }
}
