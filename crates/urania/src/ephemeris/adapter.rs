use crate::birth::GeoCoordinate;
use crate::ephemeris::provider::{EphemerisError, InitGuard, PositionProvider};
use crate::ephemeris::types::{ProviderCusp, ProviderPlanet, ProviderResponse};
use crate::western::bodies::CelestialBody;
use chrono::{DateTime, Datelike, TimeZone, Timelike, Utc};
use std::env;
use std::path::{Path, PathBuf};
use swisseph::swe::{calc_ut, houses_ex, julday, revjul};
use swisseph::{AscMc, Cusp};

/// The Swiss Ephemeris library reads its data directory once per process
static EPHEMERIS_INIT: InitGuard = InitGuard::new();

// Swiss Ephemeris body codes
const PLANET_IDS: &[(CelestialBody, i32)] = &[
    (CelestialBody::Sun, 0),
    (CelestialBody::Moon, 1),
    (CelestialBody::Mercury, 2),
    (CelestialBody::Venus, 3),
    (CelestialBody::Mars, 4),
    (CelestialBody::Jupiter, 5),
    (CelestialBody::Saturn, 6),
    (CelestialBody::Uranus, 7),
    (CelestialBody::Neptune, 8),
    (CelestialBody::Pluto, 9),
    (CelestialBody::NorthNode, 11), // TRUE_NODE
    (CelestialBody::Lilith, 12),    // MEAN_APOG
    (CelestialBody::Chiron, 15),
];

/// House system mapping
const HOUSE_SYSTEMS: &[(&str, u8)] = &[
    ("placidus", b'P'),
    ("whole_sign", b'W'),
    ("koch", b'K'),
    ("equal", b'E'),
    ("regiomontanus", b'R'),
    ("campanus", b'C'),
    ("alcabitius", b'A'),
    ("morinus", b'M'),
];

// FLG_SWIEPH | FLG_SPEED
const CALC_FLAGS: i32 = 2 | 256;

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: PathBuf,
    house_system: u8,
    bodies: Vec<CelestialBody>,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter with optional ephemeris path and house system name
    pub fn new(ephemeris_path: Option<PathBuf>, house_system: &str) -> Result<Self, EphemerisError> {
        let path = ephemeris_path.unwrap_or_else(|| {
            env::var("SWISS_EPHEMERIS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("/usr/local/share/swisseph"))
        });

        if !path.exists() {
            return Err(EphemerisError::FileNotFound {
                path: path.display().to_string(),
                message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
            });
        }

        let house_system = get_house_system_byte(house_system)?;
        EPHEMERIS_INIT.ensure(&path, set_data_path)?;

        let mut bodies: Vec<CelestialBody> = PLANET_IDS.iter().map(|(body, _)| *body).collect();
        bodies.push(CelestialBody::SouthNode);

        Ok(Self {
            ephemeris_path: path,
            house_system,
            bodies,
        })
    }

    pub fn ephemeris_path(&self) -> &Path {
        &self.ephemeris_path
    }

    /// Restrict the bodies requested from the library
    pub fn with_bodies(mut self, bodies: Vec<CelestialBody>) -> Self {
        self.bodies = bodies;
        self
    }

    /// Calculate position for a single body
    fn calc_planet_position(
        &self,
        body: CelestialBody,
        jd: f64,
    ) -> Result<ProviderPlanet, EphemerisError> {
        let planet_code = PLANET_IDS
            .iter()
            .find(|(id, _)| *id == body)
            .map(|(_, code)| *code)
            .ok_or_else(|| EphemerisError::CalculationFailed {
                planet_id: body.as_str().to_string(),
                datetime: julian_day_to_datetime(jd),
                message: format!("No Swiss Ephemeris code for {}", body),
            })?;

        let result = calc_ut(jd, planet_code as u32, CALC_FLAGS as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet_id: body.as_str().to_string(),
                datetime: julian_day_to_datetime(jd),
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let result_array = result.out;
        let speed = result_array[3];
        Ok(ProviderPlanet {
            name: body.as_str().to_string(),
            longitude: result_array[0],
            latitude: result_array[1],
            retrograde: Some(speed < 0.0),
            speed,
        })
    }

    /// Calculate house cusps and angles
    fn calc_houses(
        &self,
        jd: f64,
        location: GeoCoordinate,
    ) -> Result<(Vec<ProviderCusp>, f64, f64), EphemerisError> {
        let (c, a) = houses_ex(
            jd,
            CALC_FLAGS,
            location.latitude,
            location.longitude,
            self.house_system as i32,
        );
        let cusps = Cusp::from_array(c);
        let ascmc = AscMc::from_array(a);

        let cusp_values = [
            cusps.first, cusps.second, cusps.third, cusps.fourth,
            cusps.fifth, cusps.sixth, cusps.seventh, cusps.eighth,
            cusps.ninth, cusps.tenth, cusps.eleventh, cusps.twelfth,
        ];
        if cusp_values.iter().any(|c| !c.is_finite()) {
            return Err(EphemerisError::HouseCalculationFailed {
                message: format!(
                    "non-finite cusp at latitude {} (house system may not support it)",
                    location.latitude
                ),
            });
        }

        let houses = cusp_values
            .iter()
            .enumerate()
            .map(|(i, &cusp)| ProviderCusp {
                number: (i + 1) as u8,
                longitude: cusp,
                sign: None,
            })
            .collect();

        Ok((houses, ascmc.ascendant, ascmc.mc))
    }
}

impl PositionProvider for SwissEphemerisAdapter {
    fn name(&self) -> &str {
        "swisseph"
    }

    fn positions(
        &self,
        instant: DateTime<Utc>,
        location: GeoCoordinate,
    ) -> Result<ProviderResponse, EphemerisError> {
        let jd = datetime_to_julian_day(instant);

        let mut planets = Vec::with_capacity(self.bodies.len());
        for body in &self.bodies {
            if *body == CelestialBody::SouthNode {
                continue;
            }
            planets.push(self.calc_planet_position(*body, jd)?);
        }

        // South node mirrors the true node
        if self.bodies.contains(&CelestialBody::SouthNode) {
            let north = match planets.iter().find(|p| p.name == CelestialBody::NorthNode.as_str()) {
                Some(north) => north.clone(),
                None => self.calc_planet_position(CelestialBody::NorthNode, jd)?,
            };
            planets.push(ProviderPlanet {
                name: CelestialBody::SouthNode.as_str().to_string(),
                longitude: (north.longitude + 180.0) % 360.0,
                latitude: -north.latitude,
                retrograde: north.retrograde,
                speed: north.speed,
            });
        }

        let (cusps, ascendant, midheaven) = self.calc_houses(jd, location)?;

        Ok(ProviderResponse {
            planets,
            cusps,
            ascendant: Some(ascendant),
            midheaven: Some(midheaven),
        })
    }
}

/// The C library picks up `SE_EPHE_PATH` on its first calculation
fn set_data_path(path: &Path) -> Result<(), EphemerisError> {
    let path_str = path.to_str().ok_or_else(|| EphemerisError::InitializationFailed {
        path: path.display().to_string(),
        message: "path is not valid UTF-8".to_string(),
    })?;
    env::set_var("SE_EPHE_PATH", path_str);
    Ok(())
}

/// Convert UTC datetime to Julian Day
fn datetime_to_julian_day(dt: DateTime<Utc>) -> f64 {
    let hour_decimal =
        dt.hour() as f64 + dt.minute() as f64 / 60.0 + dt.second() as f64 / 3600.0;

    // GREG_CAL = 1
    julday(dt.year(), dt.month() as i32, dt.day() as i32, hour_decimal, 1)
}

/// Convert Julian Day to UTC datetime; used for error context only
fn julian_day_to_datetime(jd: f64) -> DateTime<Utc> {
    let (year, month, day, hour_decimal) = revjul(jd, 1);
    let hour = hour_decimal as u32;
    let minute = ((hour_decimal - hour as f64) * 60.0) as u32;
    let second = (((hour_decimal - hour as f64) * 60.0 - minute as f64) * 60.0) as u32;
    Utc.with_ymd_and_hms(year, month as u32, day as u32, hour, minute, second)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}

/// Convert house system string to byte format
fn get_house_system_byte(house_system: &str) -> Result<u8, EphemerisError> {
    HOUSE_SYSTEMS
        .iter()
        .find(|(name, _)| *name == house_system.to_lowercase())
        .map(|(_, byte)| *byte)
        .ok_or_else(|| EphemerisError::InvalidHouseSystem {
            system: house_system.to_string(),
            valid: HOUSE_SYSTEMS.iter().map(|(name, _)| name.to_string()).collect(),
        })
}
