//! Error types for the presence hub client.

use thiserror::Error;

/// Errors that can occur when talking to the hub's command API.
#[derive(Debug, Error)]
pub enum HubError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// JSON deserialization failed.
    #[error("Failed to parse hub response: {0}")]
    JsonError(String),

    /// The hub returned a device id that is not a positive integer.
    #[error("Hub returned non-numeric device id '{0}'")]
    InvalidDeviceId(String),
}
