//! CLI error handling with user-friendly messages.
//!
//! Centralizes error handling for the CLI, providing consistent
//! formatting and appropriate exit codes.

use std::fmt;
use std::process;

use tilefence::app::AppError;
use tilefence::config::config_file_path;

/// CLI-specific errors with user-friendly messages.
#[derive(Debug)]
pub enum CliError {
    /// Failed to initialize logging
    LoggingInit(String),
    /// Configuration file could not be loaded
    Config(String),
    /// Failed to create the Tokio runtime or install signal handlers
    Runtime(String),
    /// Application startup or poll loop failure
    App(AppError),
}

impl CliError {
    /// Exit the process with an appropriate error message and code.
    pub fn exit(&self) -> ! {
        eprintln!("Error: {}", self);

        // Print additional help for specific errors
        match self {
            CliError::Config(_) => {
                eprintln!();
                eprintln!(
                    "Expected a config file at {} (or pass --config).",
                    config_file_path().display()
                );
                eprintln!("See template.config.json for the expected shape.");
                process::exit(2);
            }
            _ => process::exit(1),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::LoggingInit(msg) => write!(f, "Failed to initialize logging: {}", msg),
            CliError::Config(msg) => write!(f, "{}", msg),
            CliError::Runtime(msg) => write!(f, "{}", msg),
            CliError::App(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            _ => None,
        }
    }
}
