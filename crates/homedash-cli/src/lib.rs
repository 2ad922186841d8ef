//! Terminal dashboard and command-line client for a home-automation device.
//!
//! # Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `dashboard` | Interactive terminal dashboard (default) |
//! | `status` | Poll once and print the device state |
//! | `fan` / `light` | Switch an actuator on or off |
//! | `mode` | Switch between auto and manual mode |
//! | `threshold` | Save the automation threshold |
//! | `config` | Manage the configuration file |
//! | `completions` | Generate shell completions |
//!
//! # Configuration
//!
//! Settings live in `~/.config/homedash/config.toml` (or platform equivalent):
//!
//! - `device_url`: Base URL of the device
//! - `fahrenheit`: Show temperatures in Fahrenheit
//! - `poll_interval_ms` / `poll_timeout_ms`: Poll cadence and deadline
//! - `chart_capacity`: Points kept in the dashboard chart
//!
//! # Environment Variables
//!
//! - `HOMEDASH_URL`: Device URL (overridden by `--url`)
//! - `NO_COLOR`: Disable colored output when set
//! - `RUST_LOG`: Log filter when neither `-v` nor `-q` is given
//!
//! # Examples
//!
//! ```bash
//! homedash --url http://192.168.0.114:5000
//! homedash status --format json
//! homedash threshold 75.2 --fahrenheit
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod format;
pub mod logging;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export core dependencies for convenience
pub use homedash_core;
pub use homedash_types;
