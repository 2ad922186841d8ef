//! Client library for the homedash home-automation dashboard.
//!
//! This crate talks to a home-automation device over its JSON REST API and
//! keeps the state a dashboard front-end draws from.
//!
//! # Features
//!
//! - **Polling**: fetch `/status` at startup and every two seconds, with a per-poll deadline
//! - **Commands**: switch the fan and light, change the mode, save the threshold
//! - **Race hardening**: only the newest request of each kind is ever applied
//! - **State store**: a single [`Dashboard`] owning snapshot, unit, chart and alerts
//! - **View model**: a pure [`render`] from state to everything the UI shows
//! - **Mock device**: an in-memory [`MockDevice`] for tests
//!
//! # Device API
//!
//! | Method | Path | Body |
//! |--------|------|------|
//! | GET | `/status` | |
//! | POST | `/fan` | `{"state": "on"}` |
//! | POST | `/light` | `{"state": "off"}` |
//! | POST | `/mode` | `{"mode": "auto"}` |
//! | POST | `/config` | `{"target_temp": 24.0}` |
//!
//! All temperatures on the wire are Celsius.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use homedash_core::{Dashboard, DashboardOptions, DeviceClient, DeviceWorker, WorkerConfig};
//! use tokio::sync::mpsc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Arc::new(DeviceClient::new("http://192.168.0.114:5000")?);
//!     let (cmd_tx, cmd_rx) = mpsc::channel(32);
//!     let (event_tx, mut event_rx) = mpsc::channel(32);
//!     tokio::spawn(DeviceWorker::new(client, cmd_rx, event_tx, WorkerConfig::default()).run());
//!
//!     let mut dashboard = Dashboard::new(DashboardOptions::default());
//!     while let Some(event) = event_rx.recv().await {
//!         for cmd in dashboard.apply_event(event) {
//!             cmd_tx.send(cmd).await?;
//!         }
//!         println!("{} {}", dashboard.view().temperature, dashboard.view().unit_symbol);
//!     }
//!     Ok(())
//! }
//! ```

pub mod chart;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod messages;
pub mod mock;
pub mod slot;
pub mod traits;
pub mod view;
pub mod worker;

// Re-export the shared types crate
pub use homedash_types as types;
pub use homedash_types::{ConnectionStatus, DeviceSnapshot, DisplayUnit, Mode, SwitchState};

pub use chart::{ChartBuffer, ChartPoint, DEFAULT_CHART_CAPACITY};
pub use client::DeviceClient;
pub use dashboard::{
    COMMAND_FAILED_ALERT, Dashboard, DashboardOptions, INVALID_NUMBER_ALERT, parse_threshold,
};
pub use error::{Error, Result};
pub use messages::{Command, DeviceEvent, PollFailure, RequestKind};
pub use mock::MockDevice;
pub use slot::{RequestSlot, RequestTicket};
pub use traits::DeviceApi;
pub use view::{DashboardView, Emphasis, PLACEHOLDER, SaveState, SwitchView, ThresholdInput, render};
pub use worker::{DEFAULT_POLL_INTERVAL, DEFAULT_POLL_TIMEOUT, DeviceWorker, WorkerConfig};
