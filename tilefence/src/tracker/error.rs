//! Error types for the location feed client.

use thiserror::Error;

use crate::coord::CoordError;

/// Errors that can occur when fetching or decoding tile positions.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// JSON deserialization failed.
    #[error("Failed to parse feed response: {0}")]
    JsonError(String),

    /// The feed reported a position outside valid coordinate ranges.
    #[error("Invalid position in feed: {0}")]
    InvalidPosition(#[from] CoordError),

    /// Failed to parse the `last_updated` timestamp from the feed.
    #[error("Failed to parse timestamp: {0}")]
    TimestampParse(String),
}
