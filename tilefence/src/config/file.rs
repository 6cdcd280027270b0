//! Configuration file handling for ~/.tilefence/config.json.
//!
//! The file shape mirrors the runtime model: `geofences` sections bind
//! tiles to presence devices, `exclusions` sections list bare tile ids.
//! Name-keyed sections are `BTreeMap`s so that fence registration order
//! is deterministic across runs.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// Default daemon poll interval in seconds.
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 60;

/// Default log verbosity when `RUST_LOG` is not set.
pub const DEFAULT_LOG_VERBOSITY: &str = "info";

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    /// Failed to read the config file
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse the config file
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Top-level configuration file.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    /// Daemon loop settings.
    #[serde(default)]
    pub main: MainSettings,

    /// Location feed connection.
    pub tracker: TrackerSettings,

    /// Presence hub connection.
    pub hub: HubSettings,

    /// Inclusion geofences (tile-to-device mappings).
    #[serde(default)]
    pub geofences: FenceSections,

    /// Exclusion zones (bare tile lists).
    #[serde(default)]
    pub exclusions: ExclusionSections,
}

/// Daemon loop settings.
#[derive(Debug, Clone, Deserialize)]
pub struct MainSettings {
    /// Seconds between location feed polls.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_secs: u64,

    /// Log verbosity (`error`, `warn`, `info`, `debug`, `trace`).
    #[serde(default = "default_log_verbosity")]
    pub log_verbosity: String,
}

impl Default for MainSettings {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            log_verbosity: DEFAULT_LOG_VERBOSITY.to_string(),
        }
    }
}

fn default_poll_interval() -> u64 {
    DEFAULT_POLL_INTERVAL_SECS
}

fn default_log_verbosity() -> String {
    DEFAULT_LOG_VERBOSITY.to_string()
}

/// Location feed connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TrackerSettings {
    /// URL of the tracked-tile position feed.
    pub feed_url: String,

    /// Bearer token for the feed.
    pub access_token: String,
}

/// Presence hub connection settings.
#[derive(Debug, Clone, Deserialize)]
pub struct HubSettings {
    /// Base URL of the hub, e.g. `http://hub.local`.
    pub base_url: String,

    /// Installed app id of the hub's command API.
    pub app_id: u32,

    /// API access token.
    pub access_token: String,
}

/// Inclusion geofence sections, keyed by fence name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FenceSections {
    #[serde(default)]
    pub circles: BTreeMap<String, CircleFenceConfig>,

    #[serde(default)]
    pub polygons: BTreeMap<String, PolygonFenceConfig>,
}

/// Exclusion zone sections, keyed by zone name.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExclusionSections {
    #[serde(default)]
    pub circles: BTreeMap<String, ExclusionCircleConfig>,

    #[serde(default)]
    pub polygons: BTreeMap<String, ExclusionPolygonConfig>,
}

/// A circular inclusion fence.
#[derive(Debug, Clone, Deserialize)]
pub struct CircleFenceConfig {
    pub latitude: f64,
    pub longitude: f64,

    /// Radius in meters.
    pub radius: f64,

    /// Tile identifier (name or uuid) to presence device id.
    #[serde(default)]
    pub tiles: BTreeMap<String, u32>,
}

/// A polygonal inclusion fence.
#[derive(Debug, Clone, Deserialize)]
pub struct PolygonFenceConfig {
    /// Vertex ring as `[latitude, longitude]` pairs, at least three.
    pub vertices: Vec<[f64; 2]>,

    /// Tile identifier (name or uuid) to presence device id.
    #[serde(default)]
    pub tiles: BTreeMap<String, u32>,
}

/// A circular exclusion zone; tiles are listed without device ids.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionCircleConfig {
    pub latitude: f64,
    pub longitude: f64,
    pub radius: f64,

    #[serde(default)]
    pub tiles: Vec<String>,
}

/// A polygonal exclusion zone; tiles are listed without device ids.
#[derive(Debug, Clone, Deserialize)]
pub struct ExclusionPolygonConfig {
    pub vertices: Vec<[f64; 2]>,

    #[serde(default)]
    pub tiles: Vec<String>,
}

impl ConfigFile {
    /// Load configuration from the default path (~/.tilefence/config.json).
    pub fn load() -> Result<Self, ConfigFileError> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Get the path to the config directory (~/.tilefence).
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".tilefence")
}

/// Get the path to the config file (~/.tilefence/config.json).
pub fn config_file_path() -> PathBuf {
    config_directory().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "main": { "poll_interval_secs": 30, "log_verbosity": "debug" },
        "tracker": { "feed_url": "https://feed.example/positions", "access_token": "feed-token" },
        "hub": { "base_url": "http://hub.local", "app_id": 7, "access_token": "hub-token" },
        "geofences": {
            "circles": {
                "home": {
                    "latitude": 40.690080,
                    "longitude": -74.045290,
                    "radius": 200,
                    "tiles": { "keys": 34, "wallet": 35 }
                }
            },
            "polygons": {
                "park": {
                    "vertices": [[46.999099, -121.914726], [46.993479, -121.536385], [46.779015, -121.453987]],
                    "tiles": { "backpack": 36 }
                }
            }
        },
        "exclusions": {
            "circles": {
                "office": {
                    "latitude": 46.786691,
                    "longitude": -121.734396,
                    "radius": 50,
                    "tiles": ["keys"]
                }
            }
        }
    }"#;

    #[test]
    fn test_parse_sample_config() {
        let config: ConfigFile = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(config.main.poll_interval_secs, 30);
        assert_eq!(config.main.log_verbosity, "debug");
        assert_eq!(config.tracker.feed_url, "https://feed.example/positions");
        assert_eq!(config.hub.app_id, 7);

        let home = &config.geofences.circles["home"];
        assert_eq!(home.radius, 200.0);
        assert_eq!(home.tiles["keys"], 34);

        let park = &config.geofences.polygons["park"];
        assert_eq!(park.vertices.len(), 3);

        let office = &config.exclusions.circles["office"];
        assert_eq!(office.tiles, vec!["keys".to_string()]);
    }

    #[test]
    fn test_defaults_for_optional_sections() {
        let minimal = r#"{
            "tracker": { "feed_url": "https://feed.example", "access_token": "t" },
            "hub": { "base_url": "http://hub.local", "app_id": 1, "access_token": "t" }
        }"#;

        let config: ConfigFile = serde_json::from_str(minimal).unwrap();

        assert_eq!(config.main.poll_interval_secs, DEFAULT_POLL_INTERVAL_SECS);
        assert_eq!(config.main.log_verbosity, DEFAULT_LOG_VERBOSITY);
        assert!(config.geofences.circles.is_empty());
        assert!(config.geofences.polygons.is_empty());
        assert!(config.exclusions.circles.is_empty());
        assert!(config.exclusions.polygons.is_empty());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = ConfigFile::load_from(file.path()).unwrap();
        assert_eq!(config.geofences.circles.len(), 1);
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        let result = ConfigFile::load_from(&path);
        assert!(matches!(result, Err(ConfigFileError::ReadError(_))));
    }

    #[test]
    fn test_load_invalid_json_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let result = ConfigFile::load_from(file.path());
        assert!(matches!(result, Err(ConfigFileError::ParseError(_))));
    }
}
