#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Application configuration.
//!
//! Defaults live in `config/default.toml`, embedded at compile time. A
//! different file can be supplied with `CRIME_OVERLAY_CONFIG`. Secrets and
//! deployment settings are then overlaid from the environment:
//!
//! | Variable                      | Field                          |
//! |-------------------------------|--------------------------------|
//! | `ZILLOW_API_KEY`              | `real_estate.api_key`          |
//! | `SEATTLE_APP_TOKEN`           | `socrata.app_token`            |
//! | `MAPBOX_ACCESS_TOKEN`         | `map.theme.access_token`       |
//! | `BIND_ADDR`                   | `server.bind_addr`             |
//! | `PORT`                        | `server.port`                  |
//! | `CRIME_OVERLAY_OUTPUT_DIR`    | `paths.output_dir`             |
//! | `CRIME_OVERLAY_OFFENSE_TYPES` | `paths.offense_types`          |

use std::path::{Path, PathBuf};

use crime_overlay_incident::SocrataConfig;
use crime_overlay_map::MapConfig;
use crime_overlay_real_estate::RealEstateConfig;
use serde::Deserialize;
use thiserror::Error;

const DEFAULT_TOML: &str = include_str!("../config/default.toml");

/// Errors from loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML document is invalid.
    #[error("Invalid configuration: {0}")]
    Toml(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// An environment variable held an unusable value.
    #[error("Invalid value for {name}: {message}")]
    Env {
        /// Variable name.
        name: &'static str,
        /// What was wrong with it.
        message: String,
    },
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,
    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_bind_addr() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    8080
}

/// Inputs used when a request does not specify a location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViewDefaults {
    /// Neighborhood shown when none is selected.
    pub neighborhood: String,
    /// Street address shown when none is entered.
    pub street: String,
    /// City/state/zip shown when none is entered.
    pub city_state_zip: String,
}

/// Filesystem locations. Unset entries resolve under the project's
/// `data/` directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    /// Offense code CSV.
    pub offense_types: Option<PathBuf>,
    /// Directory rendered maps are written to and served from.
    pub output_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AppConfig {
    /// HTTP listener.
    #[serde(default = "default_server")]
    pub server: ServerConfig,
    /// Incident endpoint.
    pub socrata: SocrataConfig,
    /// Real-estate lookup endpoints.
    pub real_estate: RealEstateConfig,
    /// Map viewport and theme.
    #[serde(default)]
    pub map: MapConfig,
    /// Fallback view inputs.
    pub defaults: ViewDefaults,
    /// Filesystem locations.
    #[serde(default)]
    pub paths: PathsConfig,
}

fn default_server() -> ServerConfig {
    ServerConfig {
        bind_addr: default_bind_addr(),
        port: default_port(),
    }
}

impl AppConfig {
    /// Loads the configuration file (embedded default or
    /// `CRIME_OVERLAY_CONFIG`) and overlays the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed, or an
    /// environment variable is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var("CRIME_OVERLAY_CONFIG") {
            Ok(path) => Self::from_file(Path::new(&path))?,
            Err(_) => Self::from_toml(DEFAULT_TOML)?,
        };
        config.apply_env(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    /// Parses a configuration file without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading configuration from {}", path.display());
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parses a TOML document without consulting the environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Toml`] if the document is invalid.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::de::from_str(contents)?)
    }

    /// Overlays settings from `lookup`, which maps a variable name to its
    /// value. Empty values are ignored.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `PORT` is not a valid port number.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = get("ZILLOW_API_KEY") {
            self.real_estate.api_key = key;
        }
        if let Some(token) = get("SEATTLE_APP_TOKEN") {
            self.socrata.app_token = token;
        }
        if let Some(token) = get("MAPBOX_ACCESS_TOKEN") {
            self.map.theme.access_token = token;
        }
        if let Some(addr) = get("BIND_ADDR") {
            self.server.bind_addr = addr;
        }
        if let Some(port) = get("PORT") {
            self.server.port = port.trim().parse().map_err(|e| ConfigError::Env {
                name: "PORT",
                message: format!("{e}"),
            })?;
        }
        if let Some(dir) = get("CRIME_OVERLAY_OUTPUT_DIR") {
            self.paths.output_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = get("CRIME_OVERLAY_OFFENSE_TYPES") {
            self.paths.offense_types = Some(PathBuf::from(path));
        }

        for (name, missing) in [
            ("ZILLOW_API_KEY", self.real_estate.api_key.is_empty()),
            ("SEATTLE_APP_TOKEN", self.socrata.app_token.is_empty()),
            ("MAPBOX_ACCESS_TOKEN", self.map.theme.access_token.is_empty()),
        ] {
            if missing {
                log::warn!("{name} is not set");
            }
        }

        Ok(())
    }

    /// Resolved offense code CSV path.
    #[must_use]
    pub fn offense_types_path(&self) -> PathBuf {
        self.paths
            .offense_types
            .clone()
            .unwrap_or_else(|| data_dir().join("offense_types.csv"))
    }

    /// Resolved output directory for rendered maps.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.paths
            .output_dir
            .clone()
            .unwrap_or_else(|| data_dir().join("generated"))
    }
}

/// Returns the workspace root directory.
///
/// Resolved at compile time from `CARGO_MANIFEST_DIR`.
///
/// # Panics
///
/// Panics if the project root cannot be resolved.
#[must_use]
pub fn project_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .ancestors()
        .nth(2)
        .expect("Failed to find project root from CARGO_MANIFEST_DIR")
        .to_path_buf()
}

/// Returns the `data/` directory path.
#[must_use]
pub fn data_dir() -> PathBuf {
    project_root().join("data")
}
