//! Application bootstrap implementation.
//!
//! `TileFenceApp::start` performs the full fail-fast startup sequence:
//!
//! 1. Connect to the hub and fetch the presence device inventory
//! 2. Build and validate the geofence set against that inventory
//! 3. Discover tracked tiles from the location feed, keeping only those
//!    referenced by some fence
//! 4. Spawn the presence dispatcher task
//!
//! Any failure in steps 1-3 aborts startup; there is no degraded mode
//! where part of the configuration is silently dropped.

use std::collections::HashSet;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::ConfigFile;
use crate::fence::GeofenceSet;
use crate::hub::{ChannelSink, HubClient, PresenceDispatcher};
use crate::tracker::{FeedClient, LocationClient, TrackedPoint};

use super::error::AppError;
use super::poller::PollLoop;

/// The assembled daemon: poll loop plus presence dispatcher.
pub struct TileFenceApp {
    poller: PollLoop<FeedClient, ChannelSink>,
    dispatcher: tokio::task::JoinHandle<()>,
}

impl TileFenceApp {
    /// Start the application with the given configuration.
    pub async fn start(config: ConfigFile) -> Result<Self, AppError> {
        let hub = HubClient::new(&config.hub)?;
        let devices = hub.fetch_devices().await?;
        let known_devices: HashSet<u32> = devices.keys().copied().collect();

        let geofences =
            GeofenceSet::from_config(&config.geofences, &config.exclusions, &known_devices)?;

        let feed = FeedClient::new(&config.tracker.feed_url, &config.tracker.access_token)?;
        let points = discover_points(&feed, &geofences).await?;

        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let dispatcher = PresenceDispatcher::new(hub, devices, command_rx).start();

        let poller = PollLoop::new(
            feed,
            geofences,
            points,
            ChannelSink::new(command_tx),
            Duration::from_secs(config.main.poll_interval_secs),
        );

        Ok(Self { poller, dispatcher })
    }

    /// Run the poll loop until it fails; the dispatcher is stopped on
    /// the way out.
    pub async fn run(self) -> Result<(), AppError> {
        let Self { poller, dispatcher } = self;

        let result = poller.run().await;
        dispatcher.abort();
        result
    }
}

/// Fetch the feed once and keep every tile some fence references.
async fn discover_points<C: LocationClient>(
    feed: &C,
    geofences: &GeofenceSet,
) -> Result<Vec<TrackedPoint>, AppError> {
    let records = feed.fetch_positions().await?;

    let mut points = Vec::new();
    for record in records {
        if !geofences.handles_tile(&record.name, &record.uuid) {
            warn!(tile = %record.name, uuid = %record.uuid, "Not tracking tile");
            continue;
        }

        let point = record.into_tracked_point()?;
        info!(tile = %point.full_name(), "Tracking tile");
        points.push(point);
    }

    Ok(points)
}
