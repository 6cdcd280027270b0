//! Application error types.

use thiserror::Error;

use crate::config::ConfigFileError;
use crate::fence::FenceError;
use crate::hub::HubError;
use crate::tracker::TrackerError;

/// Errors that can occur during application startup and the poll loop.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigFileError),

    /// Geofence validation failed.
    #[error("Geofence validation failed: {0}")]
    Fence(#[from] FenceError),

    /// The location feed could not be reached during startup discovery.
    #[error("Location feed error: {0}")]
    Tracker(#[from] TrackerError),

    /// The hub could not be reached or returned bad data.
    #[error("Hub error: {0}")]
    Hub(#[from] HubError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fence_error_conversion() {
        let fence_err = FenceError::InvalidRadius {
            fence: "home".to_string(),
            radius: -1.0,
        };
        let app_err: AppError = fence_err.into();

        assert!(matches!(app_err, AppError::Fence(_)));
        assert!(app_err.to_string().contains("Geofence validation failed"));
    }

    #[test]
    fn test_hub_error_conversion() {
        let hub_err = HubError::HttpError("connection refused".to_string());
        let app_err: AppError = hub_err.into();

        assert!(matches!(app_err, AppError::Hub(_)));
        assert!(app_err.to_string().contains("connection refused"));
    }
}
