//! Platform-agnostic types for the homedash home-automation dashboard.
//!
//! This crate holds the shapes exchanged with the device's REST API and the
//! small amount of domain logic that does not depend on any runtime:
//!
//! - [`DeviceSnapshot`]: the body of `GET /status`
//! - [`Mode`] and [`SwitchState`]: command targets
//! - [`DisplayUnit`]: Celsius/Fahrenheit presentation and conversion
//! - [`ConnectionStatus`]: outcome of the last poll
//!
//! # Example
//!
//! ```
//! use homedash_types::{DeviceSnapshot, DisplayUnit, Mode};
//!
//! let snapshot = DeviceSnapshot {
//!     temp: Some(21.0),
//!     mode: Mode::Auto,
//!     ..Default::default()
//! };
//! let shown = DisplayUnit::Fahrenheit.to_display(snapshot.temp.unwrap());
//! assert!((shown - 69.8).abs() < 1e-9);
//! ```

pub mod error;
pub mod types;
pub mod unit;

pub use error::ParseError;
pub use types::{
    ConfigRequest, ConnectionStatus, DeviceSnapshot, Mode, ModeRequest, SwitchRequest,
    SwitchState,
};
pub use unit::DisplayUnit;
