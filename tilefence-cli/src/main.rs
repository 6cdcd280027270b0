//! TileFence CLI - Command-line interface
//!
//! This binary provides a command-line interface to the TileFence
//! library: run the daemon, validate a configuration, or print paths.

mod commands;
mod error;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use error::CliError;

#[derive(Parser)]
#[command(name = "tilefence")]
#[command(version = tilefence::VERSION)]
#[command(about = "Bridge tile trackers to hub presence devices via geofences", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the geofence daemon until interrupted
    Run {
        /// Path to the configuration file (default: ~/.tilefence/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate the configuration against the hub and report counts
    Check {
        /// Path to the configuration file (default: ~/.tilefence/config.json)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Print the default configuration file path
    ConfigPath,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<(), CliError> = match cli.command {
        Commands::Run { config } => commands::run::run(config),
        Commands::Check { config } => commands::check::run(config),
        Commands::ConfigPath => {
            println!("{}", tilefence::config::config_file_path().display());
            Ok(())
        }
    };

    if let Err(e) = result {
        e.exit();
    }
}
