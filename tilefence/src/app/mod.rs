//! Application bootstrap and daemon lifecycle.
//!
//! `TileFenceApp` wires the collaborators together in the right order
//! and owns their lifetimes:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      TileFenceApp                        │
//! │                                                          │
//! │  HubClient ──► device inventory ──► GeofenceSet          │
//! │                                        │                 │
//! │  FeedClient ──► tile discovery ──► PollLoop              │
//! │                                        │ ChannelSink     │
//! │                                        ▼                 │
//! │                              PresenceDispatcher task     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use tilefence::app::TileFenceApp;
//! use tilefence::config::ConfigFile;
//!
//! let config = ConfigFile::load()?;
//! let app = TileFenceApp::start(config).await?;
//! app.run().await?;
//! ```

mod bootstrap;
mod error;
mod poller;

pub use bootstrap::TileFenceApp;
pub use error::AppError;
pub use poller::PollLoop;
