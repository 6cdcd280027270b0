//! Presence command dispatch.
//!
//! The engine hands presence decisions to a synchronous sink; the actual
//! hub commands are HTTP calls. [`ChannelSink`] bridges the two: it
//! implements the sink by enqueueing [`PresenceCommand`]s on an
//! unbounded channel, and the [`PresenceDispatcher`] task drains the
//! channel, suppresses commands that would not change device state, and
//! pushes the rest to the hub.
//!
//! Suppression lives here, not in the engine: the engine reports every
//! decision every cycle, and the hub's API is rate limited, so the
//! dispatcher keeps the last state it successfully sent per device and
//! only forwards changes. A failed send is logged and dropped; the next
//! cycle's decision retries it naturally.

use std::collections::HashMap;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::fence::PresenceSink;

use super::client::{presence_command, HubClient};
use super::device::Device;

/// A presence decision for one device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceCommand {
    pub device_id: u32,
    pub arrived: bool,
}

/// Synchronous sink that forwards decisions to the dispatcher task.
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<PresenceCommand>,
}

impl ChannelSink {
    pub fn new(tx: mpsc::UnboundedSender<PresenceCommand>) -> Self {
        Self { tx }
    }
}

impl PresenceSink for ChannelSink {
    fn set_presence(&mut self, device_id: u32, arrived: bool) {
        let command = PresenceCommand { device_id, arrived };
        if self.tx.send(command).is_err() {
            warn!(device_id, arrived, "Presence dispatcher gone, dropping command");
        }
    }
}

/// Daemon task that owns per-device state and the hub client.
pub struct PresenceDispatcher {
    client: HubClient,
    devices: HashMap<u32, Device>,
    rx: mpsc::UnboundedReceiver<PresenceCommand>,
    last_sent: HashMap<u32, bool>,
}

impl PresenceDispatcher {
    /// Create a dispatcher over the hub's presence inventory.
    pub fn new(
        client: HubClient,
        devices: HashMap<u32, Device>,
        rx: mpsc::UnboundedReceiver<PresenceCommand>,
    ) -> Self {
        Self {
            client,
            devices,
            rx,
            last_sent: HashMap::new(),
        }
    }

    /// Start the dispatcher as an async task.
    pub fn start(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// Drain commands until every sink is dropped.
    async fn run(mut self) {
        info!(devices = self.devices.len(), "Presence dispatcher started");

        while let Some(command) = self.rx.recv().await {
            self.dispatch(command).await;
        }

        info!("Presence dispatcher stopped");
    }

    /// True if this command would change the device's last-sent state.
    fn should_send(&self, command: &PresenceCommand) -> bool {
        self.last_sent.get(&command.device_id) != Some(&command.arrived)
    }

    fn device_name(&self, device_id: u32) -> String {
        self.devices
            .get(&device_id)
            .map(Device::display_name)
            .unwrap_or_else(|| format!("({})", device_id))
    }

    async fn dispatch(&mut self, command: PresenceCommand) {
        if !self.should_send(&command) {
            debug!(
                device = %self.device_name(command.device_id),
                "Presence unchanged, suppressing command"
            );
            return;
        }

        let verb = presence_command(command.arrived);
        match self
            .client
            .send_presence(command.device_id, command.arrived)
            .await
        {
            Ok(()) => {
                info!(
                    device = %self.device_name(command.device_id),
                    command = verb,
                    "Sent presence command to hub device"
                );
                self.last_sent.insert(command.device_id, command.arrived);
            }
            Err(e) => {
                warn!(
                    device = %self.device_name(command.device_id),
                    command = verb,
                    error = %e,
                    "Failed to send presence command"
                );
            }
        }
    }
}
