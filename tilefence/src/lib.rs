//! TileFence - geofence presence bridge for Bluetooth tile trackers
//!
//! This library polls a cloud location feed for tracked tile positions,
//! evaluates each position against configured geofences (circles and
//! polygons, with exclusion zones), and pushes arrived/departed state to
//! virtual presence devices on a home-automation hub.
//!
//! # High-Level API
//!
//! For most use cases, the [`app`] module provides the assembled daemon:
//!
//! ```ignore
//! use tilefence::app::TileFenceApp;
//! use tilefence::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let app = TileFenceApp::start(config).await?;
//! app.run().await?;
//! ```
//!
//! The engine itself ([`fence::GeofenceSet`]) is a pure, synchronous
//! component that can be used standalone: given the same fences and the
//! same coordinate, containment always returns the same result.

pub mod app;
pub mod config;
pub mod coord;
pub mod fence;
pub mod hub;
pub mod logging;
pub mod tracker;

/// Version of the TileFence library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
