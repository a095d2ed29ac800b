//! Engine configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ganzhi::Pillar;

/// Year whose pillar the yearly overlay is computed against by default
/// (丙午).
pub const DEFAULT_REFERENCE_YEAR: i32 = 2026;

/// Main configuration structure.
///
/// ```toml
/// reference_year = 2026
///
/// [data]
/// calendar = "data/manselyeog.csv"
/// solar_terms = "data/solar_terms.json"
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Gregorian year used for the yearly overlay.
    #[serde(default = "default_reference_year")]
    pub reference_year: i32,
    #[serde(default)]
    pub data: DataConfig,
}

/// Locations of the table files, see [`crate::tables::Tables::load`].
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DataConfig {
    pub calendar: PathBuf,
    pub solar_terms: PathBuf,
}

fn default_reference_year() -> i32 {
    DEFAULT_REFERENCE_YEAR
}

impl Default for Config {
    fn default() -> Self {
        Self {
            reference_year: DEFAULT_REFERENCE_YEAR,
            data: DataConfig::default(),
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            calendar: PathBuf::from("data/manselyeog.csv"),
            solar_terms: PathBuf::from("data/solar_terms.json"),
        }
    }
}

impl Config {
    /// Parses TOML text; missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.data.calendar.as_os_str().is_empty() {
            return Err(Error::Config("data.calendar must not be empty".into()));
        }
        if self.data.solar_terms.as_os_str().is_empty() {
            return Err(Error::Config("data.solar_terms must not be empty".into()));
        }
        Ok(())
    }

    /// Pillar of the reference year.
    pub fn reference_pillar(&self) -> Pillar {
        Pillar::for_year(self.reference_year)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(2026, config.reference_year);
        assert_eq!("丙午", config.reference_pillar().to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn from_toml() {
        let config = Config::from_toml_str("reference_year = 2027").unwrap();
        assert_eq!("丁未", config.reference_pillar().to_string());
        assert_eq!(DataConfig::default(), config.data);

        let config = Config::from_toml_str(
            "[data]\ncalendar = \"/srv/m.csv\"\nsolar_terms = \"/srv/t.json\"\n",
        )
        .unwrap();
        assert_eq!(DEFAULT_REFERENCE_YEAR, config.reference_year);
        assert_eq!(Path::new("/srv/m.csv"), config.data.calendar);
    }

    #[test]
    fn rejects_bad_config() {
        assert!(matches!(
            Config::from_toml_str("reference_year = \"soon\""),
            Err(Error::Toml(_))
        ));
        assert!(matches!(
            Config::from_toml_str("[data]\ncalendar = \"\"\nsolar_terms = \"t.json\"\n"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Config::from_file(Path::new("/nonexistent/kolonaro.toml")),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = Config::default();
        let text = toml::to_string(&config).expect("config must serialize to TOML");
        assert_eq!(config, Config::from_toml_str(&text).unwrap());
    }
}
