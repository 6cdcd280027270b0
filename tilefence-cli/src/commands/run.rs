//! Run command - start the geofence daemon.

use std::path::PathBuf;

use tilefence::app::TileFenceApp;
use tilefence::logging::init_logging;

use crate::error::CliError;

use super::common::{build_runtime, load_config};

/// Run the daemon until the poll loop fails or the user interrupts it.
pub fn run(config_path: Option<PathBuf>) -> Result<(), CliError> {
    let config = load_config(config_path)?;

    let _guard = init_logging("logs", "tilefence.log", &config.main.log_verbosity)
        .map_err(|e| CliError::LoggingInit(e.to_string()))?;

    tracing::info!(version = tilefence::VERSION, "TileFence starting");

    let runtime = build_runtime()?;
    runtime.block_on(async move {
        let app = TileFenceApp::start(config).await.map_err(CliError::App)?;

        let (shutdown_tx, mut shutdown_rx) = tokio::sync::mpsc::unbounded_channel::<()>();
        ctrlc::set_handler(move || {
            let _ = shutdown_tx.send(());
        })
        .map_err(|e| CliError::Runtime(format!("Failed to install signal handler: {}", e)))?;

        tokio::select! {
            result = app.run() => result.map_err(CliError::App),
            _ = shutdown_rx.recv() => {
                tracing::info!("Shutdown requested, stopping");
                Ok(())
            }
        }
    })
}
