//! natal - compute a natal chart, or serve it from the cache
//!
//! Usage:
//!   natal --name Olena --date 2025-01-01 --time 12:00 --timezone UTC \
//!         --location "Kyiv, Ukraine" --lat 50.45 --lon 30.52 \
//!         --positions apps/natal/data/kyiv_2025.json

use anyhow::Context;
use chrono::{NaiveDate, NaiveTime};
use clap::Parser;
use std::path::PathBuf;
use urania::{
    BirthDetails, ChartCache, ChartEngine, ChartSource, FileChartStore, GeoCoordinate,
    MappingPolicy, OrbSettings, PositionProvider, RecordedProvider,
};
use urania_config::UraniaConfig;

/// Natal chart calculation with an offline chart cache.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Name of the chart subject
    #[arg(long)]
    name: String,

    /// Birth date, YYYY-MM-DD
    #[arg(long)]
    date: NaiveDate,

    /// Local birth time, HH:MM or HH:MM:SS
    #[arg(long, value_parser = parse_time)]
    time: NaiveTime,

    /// IANA timezone id of the birthplace
    #[arg(long, default_value = "UTC")]
    timezone: String,

    /// Free-text place of birth
    #[arg(long)]
    location: String,

    /// Latitude in degrees, north positive
    #[arg(long, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude in degrees, east positive
    #[arg(long, allow_hyphen_values = true)]
    lon: f64,

    /// Recorded provider response (JSON) to use instead of the ephemeris
    #[arg(long)]
    positions: Option<PathBuf>,

    /// Config file; defaults to configs/urania.toml when present
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recompute even when a cached chart exists
    #[arg(long)]
    regenerate: bool,

    /// Neither read nor write the cache
    #[arg(long)]
    no_cache: bool,
}

fn parse_time(value: &str) -> Result<NaiveTime, String> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M"))
        .map_err(|e| format!("invalid time '{}': {}", value, e))
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = urania_config::load_config(cli.config.as_deref())?;
    match &config.source {
        Some(path) => log::info!("Loaded config from {}", path.display()),
        None => log::info!("No config file found; using defaults"),
    }

    let coordinate = GeoCoordinate::new(cli.lat, cli.lon).context("Invalid birth coordinate")?;
    let details = BirthDetails::new(
        cli.name.clone(),
        cli.date,
        cli.time,
        cli.location.clone(),
        cli.timezone.clone(),
    )
    .with_coordinate(coordinate);

    match &cli.positions {
        Some(path) => {
            let provider = RecordedProvider::from_json_file(path)
                .with_context(|| format!("Failed to load positions from {}", path.display()))?;
            run(provider, &cli, &config, &details)
        }
        None => run(ephemeris_provider(&config)?, &cli, &config, &details),
    }
}

#[cfg(feature = "swisseph")]
fn ephemeris_provider(config: &UraniaConfig) -> anyhow::Result<urania::SwissEphemerisAdapter> {
    urania::SwissEphemerisAdapter::new(
        config.ephemeris.path.clone(),
        &config.ephemeris.house_system,
    )
    .context("Failed to initialize Swiss Ephemeris")
}

#[cfg(not(feature = "swisseph"))]
fn ephemeris_provider(_config: &UraniaConfig) -> anyhow::Result<RecordedProvider> {
    anyhow::bail!("Built without the swisseph feature; pass --positions <file.json>")
}

fn run<P: PositionProvider>(
    provider: P,
    cli: &Cli,
    config: &UraniaConfig,
    details: &BirthDetails,
) -> anyhow::Result<()> {
    let policy = MappingPolicy::from_name(&config.aspects.mapping).unwrap_or_default();
    let orbs = OrbSettings::from_names(&config.aspects.orbs, policy)
        .context("Invalid [aspects.orbs] in config")?;

    let cache = if cli.no_cache || !config.cache.enabled {
        None
    } else {
        let dir = match config.cache.dir.clone() {
            Some(dir) => dir,
            None => FileChartStore::default_location()
                .context("No platform cache directory; set [cache] dir in the config")?,
        };
        log::debug!("Chart cache at {}", dir.display());
        Some(ChartCache::new(FileChartStore::new(&dir)?))
    };

    let engine = ChartEngine::new(provider, cache).with_orbs(orbs);
    let outcome = engine
        .generate(details, cli.regenerate)
        .with_context(|| format!("Could not produce a chart for '{}'", details.name))?;

    let origin = match outcome.source {
        ChartSource::Cache => "cache",
        ChartSource::Computed => "provider",
    };
    log::info!("Chart for '{}' served from {}", details.name, origin);

    println!("{}", serde_json::to_string_pretty(&outcome.chart)?);
    Ok(())
}
