use anyhow::Context;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Paths tried when no explicit config file is given
pub const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/urania.toml", "../../configs/urania.toml"];

#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSettings {
    /// Directory holding ephemeris data files, when the backend needs one
    pub path: Option<PathBuf>,
    pub house_system: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CacheSettings {
    /// Override for the platform cache directory
    pub dir: Option<PathBuf>,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AspectSettings {
    /// Name handling policy, `strict` or `lenient`
    pub mapping: String,
    /// Per-aspect orb overrides in degrees, keyed by aspect name
    pub orbs: HashMap<String, f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UraniaConfig {
    pub ephemeris: EphemerisSettings,
    pub cache: CacheSettings,
    pub aspects: AspectSettings,
    /// File the settings were read from; `None` means built-in defaults
    pub source: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct EphemerisToml {
    #[serde(default)]
    path: Option<PathBuf>,
    #[serde(default)]
    house_system: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct CacheToml {
    #[serde(default)]
    dir: Option<PathBuf>,
    #[serde(default = "default_cache_enabled")]
    enabled: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AspectsToml {
    #[serde(default)]
    mapping: Option<String>,
    #[serde(default)]
    orbs: HashMap<String, f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RootConfigToml {
    #[serde(default)]
    ephemeris: Option<EphemerisToml>,
    #[serde(default)]
    cache: Option<CacheToml>,
    #[serde(default)]
    aspects: Option<AspectsToml>,
}

fn default_cache_enabled() -> bool {
    true
}

fn default_house_system() -> String {
    "placidus".to_string()
}

fn default_mapping() -> String {
    "strict".to_string()
}

impl Default for UraniaConfig {
    fn default() -> Self {
        Self {
            ephemeris: EphemerisSettings {
                path: None,
                house_system: default_house_system(),
            },
            cache: CacheSettings {
                dir: None,
                enabled: default_cache_enabled(),
            },
            aspects: AspectSettings {
                mapping: default_mapping(),
                orbs: HashMap::new(),
            },
            source: None,
        }
    }
}

/// Try the common relative paths for `configs/urania.toml`.
/// Returns `None` when none of them exists.
pub fn read_config_text() -> anyhow::Result<Option<(PathBuf, String)>> {
    for p in &DEFAULT_CONFIG_PATHS {
        let path = Path::new(p);
        match fs::read_to_string(path) {
            Ok(text) => return Ok(Some((path.to_path_buf(), text))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", path.display()))
            }
        }
    }
    Ok(None)
}

/// Parse settings from TOML text. Absent sections and keys take defaults.
pub fn parse_config(text: &str) -> anyhow::Result<UraniaConfig> {
    let root: RootConfigToml = toml::from_str(text).context("Failed to parse urania.toml")?;
    let ephemeris = root.ephemeris.unwrap_or_default();
    let cache = root.cache.unwrap_or(CacheToml {
        dir: None,
        enabled: default_cache_enabled(),
    });
    let aspects = root.aspects.unwrap_or_default();

    let mapping = aspects.mapping.unwrap_or_else(default_mapping);
    if !matches!(mapping.to_lowercase().as_str(), "strict" | "lenient") {
        anyhow::bail!(
            "aspects.mapping must be \"strict\" or \"lenient\", got \"{}\"",
            mapping
        );
    }
    for (name, orb) in &aspects.orbs {
        if !orb.is_finite() || *orb < 0.0 {
            anyhow::bail!("aspects.orbs.{} must be a non-negative number, got {}", name, orb);
        }
    }

    Ok(UraniaConfig {
        ephemeris: EphemerisSettings {
            path: ephemeris.path,
            house_system: ephemeris.house_system.unwrap_or_else(default_house_system),
        },
        cache: CacheSettings {
            dir: cache.dir,
            enabled: cache.enabled,
        },
        aspects: AspectSettings {
            mapping,
            orbs: aspects.orbs,
        },
        source: None,
    })
}

/// Load settings from `path`, or from the first default location that
/// exists. An explicit path must exist; with no file anywhere the
/// defaults apply.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<UraniaConfig> {
    let (source, text) = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            (path.to_path_buf(), text)
        }
        None => match read_config_text()? {
            Some(found) => found,
            None => return Ok(UraniaConfig::default()),
        },
    };
    let mut config =
        parse_config(&text).with_context(|| format!("Invalid config {}", source.display()))?;
    config.source = Some(source);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_gives_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, UraniaConfig::default());
        assert!(config.cache.enabled);
        assert_eq!(config.ephemeris.house_system, "placidus");
        assert_eq!(config.aspects.mapping, "strict");
    }

    #[test]
    fn test_full_config() {
        let text = r#"
[ephemeris]
path = "/usr/share/ephe"
house_system = "koch"

[cache]
dir = "/tmp/charts"
enabled = false

[aspects]
mapping = "lenient"

[aspects.orbs]
trine = 6.0
conjunction = 5
"#;
        let config = parse_config(text).unwrap();
        assert_eq!(config.ephemeris.path, Some(PathBuf::from("/usr/share/ephe")));
        assert_eq!(config.ephemeris.house_system, "koch");
        assert_eq!(config.cache.dir, Some(PathBuf::from("/tmp/charts")));
        assert!(!config.cache.enabled);
        assert_eq!(config.aspects.mapping, "lenient");
        assert_eq!(config.aspects.orbs.get("trine"), Some(&6.0));
        assert_eq!(config.aspects.orbs.get("conjunction"), Some(&5.0));
    }

    #[test]
    fn test_partial_cache_section_keeps_enabled_default() {
        let config = parse_config("[cache]\ndir = \"charts\"\n").unwrap();
        assert!(config.cache.enabled);
        assert_eq!(config.cache.dir, Some(PathBuf::from("charts")));
    }

    #[test]
    fn test_malformed_config_is_error() {
        assert!(parse_config("[cache\nenabled = true").is_err());
        assert!(parse_config("[cache]\nenabled = \"yes\"").is_err());
        assert!(parse_config("[aspects]\nmapping = \"loose\"").is_err());
        assert!(parse_config("[aspects.orbs]\ntrine = -1.0").is_err());
        assert!(parse_config("[ephemeris]\nhouse = \"koch\"").is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("urania.toml");
        fs::write(&path, "[ephemeris]\nhouse_system = \"equal\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.ephemeris.house_system, "equal");
        assert_eq!(config.source.as_deref(), Some(path.as_path()));

        let missing = dir.path().join("missing.toml");
        let err = load_config(Some(&missing)).unwrap_err();
        assert!(err.to_string().contains("missing.toml"));
    }
}
