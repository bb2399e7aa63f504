//! Raw positions to a complete natal chart.

use crate::aspects::{AspectCalculator, OrbSettings};
use crate::birth::BirthDetails;
use crate::chart::natal::NatalChart;
use crate::chart::ChartError;
use crate::ephemeris::RawChartData;
use crate::western::{
    normalize_longitude, resolve_house_rulers, House, HouseTable, Planet, ZodiacSign,
};
use chrono::{DateTime, Utc};

/// Assemble a chart with the default orbs.
pub fn assemble_chart(
    details: &BirthDetails,
    raw: &RawChartData,
    calculated_at: DateTime<Utc>,
) -> Result<NatalChart, ChartError> {
    assemble_chart_with_orbs(details, raw, calculated_at, &OrbSettings::default())
}

/// Assemble a chart from mapped provider data.
///
/// Longitudes are normalized, every planet is placed in a house, aspects and
/// house rulers are derived. Ascendant and midheaven come from the
/// provider's dedicated angles when present, otherwise from the cusps of
/// houses 1 and 10.
pub fn assemble_chart_with_orbs(
    details: &BirthDetails,
    raw: &RawChartData,
    calculated_at: DateTime<Utc>,
    orbs: &OrbSettings,
) -> Result<NatalChart, ChartError> {
    details.validate()?;
    let coordinate = details.coordinate.ok_or(ChartError::MissingCoordinate)?;

    let mut houses: Vec<House> = raw
        .cusps
        .iter()
        .map(|cusp| House::new(cusp.number, cusp.longitude))
        .collect();
    let table = HouseTable::new(&houses)?;
    houses.sort_by_key(|h| h.number);

    let planets = raw
        .planets
        .iter()
        .map(|p| {
            if !p.longitude.is_finite() {
                return Err(ChartError::InvalidPosition { body: p.body });
            }
            let longitude = normalize_longitude(p.longitude);
            Ok(Planet {
                body: p.body,
                longitude,
                latitude: p.latitude,
                sign: ZodiacSign::from_longitude(longitude),
                house: table.assign(longitude),
                retrograde: p.retrograde || p.speed < 0.0,
                speed: p.speed,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let aspects = AspectCalculator::new().detect(&planets, orbs);
    let house_rulers = resolve_house_rulers(&houses, &planets);

    let angle_or_cusp = |angle: Option<f64>, house: u8| {
        angle
            .filter(|a| a.is_finite())
            .map(normalize_longitude)
            .or_else(|| table.cusp(house))
            .unwrap_or_default()
    };
    let ascendant = angle_or_cusp(raw.ascendant, 1);
    let midheaven = angle_or_cusp(raw.midheaven, 10);

    log::debug!(
        "Assembled chart for '{}': {} planets, {} aspects, {} rulers",
        details.name,
        planets.len(),
        aspects.len(),
        house_rulers.len()
    );

    Ok(NatalChart {
        birth_date: details.birth_date,
        birth_time: details.birth_time,
        latitude: coordinate.latitude,
        longitude: coordinate.longitude,
        location_name: details.location.clone(),
        planets,
        houses,
        aspects,
        house_rulers,
        ascendant,
        midheaven,
        calculated_at,
        image_reference: None,
    })
}
