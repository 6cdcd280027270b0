//! Tracked tile positions and the cloud location feed.
//!
//! - [`TrackedPoint`] - one tile's identifiers, position, and per-cycle
//!   evaluation state
//! - [`LocationClient`] - feed abstraction (mockable in tests)
//! - [`FeedClient`] - reqwest implementation against the JSON feed

mod client;
mod error;
mod point;

pub use client::{FeedClient, LocationClient, PositionRecord};
pub use error::TrackerError;
pub use point::TrackedPoint;
