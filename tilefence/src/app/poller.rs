//! Poll loop daemon.
//!
//! Periodically fetches the position feed, refreshes the retained
//! tracked points, and evaluates each against the geofence set.
//!
//! # Design
//!
//! - Async `run()` loop with `tokio::time::interval`
//! - Exponential backoff on feed errors (2^n seconds, capped at 5 minutes)
//! - Malformed single records are logged and skipped, not fatal
//! - Evaluation errors (ambiguous bindings) abort the loop: they mean the
//!   configuration is wrong and restarting into the same state would
//!   just fail again

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::fence::{GeofenceSet, PresenceSink};
use crate::tracker::{LocationClient, PositionRecord, TrackedPoint};

use super::error::AppError;

/// Maximum backoff duration (5 minutes).
const MAX_BACKOFF: Duration = Duration::from_secs(300);

/// The daemon's evaluation loop over all tracked tiles.
pub struct PollLoop<C: LocationClient, S: PresenceSink> {
    client: C,
    geofences: GeofenceSet,
    points: Vec<TrackedPoint>,
    sink: S,
    poll_interval: Duration,
}

impl<C: LocationClient, S: PresenceSink> PollLoop<C, S> {
    /// Create a poll loop over an already-discovered set of points.
    pub fn new(
        client: C,
        geofences: GeofenceSet,
        points: Vec<TrackedPoint>,
        sink: S,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            geofences,
            points,
            sink,
            poll_interval,
        }
    }

    /// Run the loop until an evaluation error occurs.
    pub async fn run(mut self) -> Result<(), AppError> {
        info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            tracked_tiles = self.points.len(),
            "Geofence poll loop started"
        );

        let mut interval = tokio::time::interval(self.poll_interval);
        let mut consecutive_errors: u32 = 0;

        loop {
            interval.tick().await;

            // Apply backoff if we've had consecutive feed errors
            if consecutive_errors > 0 {
                let backoff = calculate_backoff(consecutive_errors);
                debug!(
                    backoff_secs = backoff.as_secs(),
                    consecutive_errors,
                    "Backing off after feed errors"
                );
                tokio::time::sleep(backoff).await;
            }

            match self.client.fetch_positions().await {
                Ok(records) => {
                    consecutive_errors = 0;
                    self.refresh(records);
                    self.evaluate_all()?;
                }
                Err(e) => {
                    consecutive_errors += 1;
                    warn!(
                        error = %e,
                        consecutive_errors,
                        "Failed to fetch location feed"
                    );
                }
            }
        }
    }

    /// Apply fresh feed records to the retained points.
    ///
    /// Records for tiles we do not track are ignored; records with bad
    /// coordinates or timestamps are skipped with a warning so one
    /// corrupt entry cannot take the daemon down.
    fn refresh(&mut self, records: Vec<PositionRecord>) {
        for record in records {
            let Some(point) = self.points.iter_mut().find(|p| p.uuid() == record.uuid) else {
                continue;
            };

            let coordinate = match record.coordinate() {
                Ok(c) => c,
                Err(e) => {
                    warn!(tile = %record.name, error = %e, "Ignoring position update");
                    continue;
                }
            };
            let timestamp = match record.timestamp() {
                Ok(t) => t,
                Err(e) => {
                    warn!(tile = %record.name, error = %e, "Ignoring position update");
                    continue;
                }
            };

            point.update_position(coordinate, timestamp);
            debug!(
                tile = %point.full_name(),
                last_update = %point.last_update(),
                "Tile position refreshed"
            );
        }
    }

    /// Evaluate every tracked point against the geofence set.
    fn evaluate_all(&mut self) -> Result<(), AppError> {
        for point in &mut self.points {
            self.geofences.evaluate(point, &mut self.sink)?;
        }
        Ok(())
    }
}

/// Exponential backoff for consecutive errors: 2^n seconds, capped.
fn calculate_backoff(consecutive_errors: u32) -> Duration {
    let secs = 2u64.saturating_pow(consecutive_errors.min(16));
    Duration::from_secs(secs).min(MAX_BACKOFF)
}
