//! Configuration for the TileFence daemon.
//!
//! The configuration file is a single JSON document under
//! `~/.tilefence/`, covering the daemon loop, the location feed, the hub
//! connection, and every geofence definition. Loading lives in
//! [`file`]; structural validation of the fences (device ids, geometry)
//! is the fence registry's job, not the config layer's.

mod file;

pub use file::{
    config_directory, config_file_path, CircleFenceConfig, ConfigFile, ConfigFileError,
    ExclusionCircleConfig, ExclusionPolygonConfig, ExclusionSections, FenceSections, HubSettings,
    MainSettings, PolygonFenceConfig, TrackerSettings, DEFAULT_LOG_VERBOSITY,
    DEFAULT_POLL_INTERVAL_SECS,
};
