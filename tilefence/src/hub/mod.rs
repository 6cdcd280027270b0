//! Presence hub integration.
//!
//! - [`HubClient`] - REST client for the hub's command API
//! - [`Device`] - virtual presence device inventory entries
//! - [`ChannelSink`] / [`PresenceDispatcher`] - bridge between the
//!   synchronous engine sink and asynchronous hub commands, including
//!   suppression of unchanged presence state

mod client;
mod device;
mod error;
mod sink;

pub use client::HubClient;
pub use device::{build_inventory, Device, DeviceRecord, VIRTUAL_PRESENCE_TYPE};
pub use error::HubError;
pub use sink::{ChannelSink, PresenceCommand, PresenceDispatcher};
