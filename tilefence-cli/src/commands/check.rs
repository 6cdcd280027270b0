//! Check command - validate configuration without starting the daemon.
//!
//! Performs the same fail-fast startup validation as `run` (hub
//! inventory, fence registry invariants) and reports what was found.

use std::collections::HashSet;
use std::path::PathBuf;

use tilefence::fence::GeofenceSet;
use tilefence::hub::HubClient;

use crate::error::CliError;

use super::common::{build_runtime, load_config};

/// Run the check command.
pub fn run(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    let runtime = build_runtime()?;
    runtime.block_on(async move {
        let hub = HubClient::new(&config.hub).map_err(|e| CliError::App(e.into()))?;
        let devices = hub
            .fetch_devices()
            .await
            .map_err(|e| CliError::App(e.into()))?;
        let known_devices: HashSet<u32> = devices.keys().copied().collect();

        let geofences =
            GeofenceSet::from_config(&config.geofences, &config.exclusions, &known_devices)
                .map_err(|e| CliError::App(e.into()))?;

        println!("Configuration OK:");
        println!("  {} hub presence devices", devices.len());
        println!(
            "  {} geofences, {} exclusion zones",
            geofences.inclusion_count(),
            geofences.exclusion_count()
        );
        println!("  {} tile identifiers referenced", geofences.tile_count());

        Ok(())
    })
}
