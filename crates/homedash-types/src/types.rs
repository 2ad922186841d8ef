//! Core types for device state and commands.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Operating mode of the device.
///
/// In [`Mode::Auto`] the device drives the fan and light itself, so manual
/// actuation is suppressed on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Mode {
    /// The device owns the actuators.
    Auto,
    /// The user owns the actuators.
    #[default]
    Manual,
}

impl Mode {
    /// Wire representation (`"auto"` / `"manual"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Auto => "auto",
            Mode::Manual => "manual",
        }
    }

    /// The other mode.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Mode::Auto => Mode::Manual,
            Mode::Manual => Mode::Auto,
        }
    }

    /// Whether this is [`Mode::Auto`].
    #[must_use]
    pub const fn is_auto(self) -> bool {
        matches!(self, Mode::Auto)
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Mode::Auto),
            "manual" => Ok(Mode::Manual),
            _ => Err(ParseError::InvalidMode(s.to_string())),
        }
    }
}

/// Target state for a fan or light command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum SwitchState {
    On,
    Off,
}

impl SwitchState {
    /// Convert from the boolean carried in a [`DeviceSnapshot`].
    #[must_use]
    pub const fn from_bool(on: bool) -> Self {
        if on { SwitchState::On } else { SwitchState::Off }
    }

    #[must_use]
    pub const fn is_on(self) -> bool {
        matches!(self, SwitchState::On)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            SwitchState::On => SwitchState::Off,
            SwitchState::Off => SwitchState::On,
        }
    }

    /// Wire representation (`"on"` / `"off"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            SwitchState::On => "on",
            SwitchState::Off => "off",
        }
    }
}

impl fmt::Display for SwitchState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SwitchState {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on" | "1" | "true" => Ok(SwitchState::On),
            "off" | "0" | "false" => Ok(SwitchState::Off),
            _ => Err(ParseError::InvalidSwitchState(s.to_string())),
        }
    }
}

/// Full device state as returned by `GET /status`.
///
/// A snapshot is never patched: each successful poll replaces the previous
/// one wholesale. All temperatures are in Celsius.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviceSnapshot {
    /// Temperature in °C, if the sensor reported one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub temp: Option<f64>,
    /// Relative humidity in %, if the sensor reported one.
    #[cfg_attr(feature = "serde", serde(default))]
    pub humidity: Option<f64>,
    /// Whether someone is present in the room.
    #[cfg_attr(feature = "serde", serde(default))]
    pub presence: bool,
    /// Whether the fan is running.
    #[cfg_attr(feature = "serde", serde(default))]
    pub fan: bool,
    /// Whether the light is on.
    #[cfg_attr(feature = "serde", serde(default))]
    pub light: bool,
    /// Current operating mode.
    #[cfg_attr(feature = "serde", serde(default))]
    pub mode: Mode,
    /// Automation threshold in °C.
    #[cfg_attr(feature = "serde", serde(default))]
    pub target_temp: Option<f64>,
}

impl DeviceSnapshot {
    /// Fan state as a [`SwitchState`].
    #[must_use]
    pub fn fan_state(&self) -> SwitchState {
        SwitchState::from_bool(self.fan)
    }

    /// Light state as a [`SwitchState`].
    #[must_use]
    pub fn light_state(&self) -> SwitchState {
        SwitchState::from_bool(self.light)
    }

    /// Temperature and humidity, only when both are present.
    #[must_use]
    pub fn climate(&self) -> Option<(f64, f64)> {
        Some((self.temp?, self.humidity?))
    }
}

/// Outcome of the most recent status poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ConnectionStatus {
    /// The last poll succeeded.
    Connected,
    /// The last poll exceeded its deadline.
    Timeout,
    /// The last poll failed for any other reason, or no poll has completed yet.
    #[default]
    Disconnected,
}

impl ConnectionStatus {
    /// Label shown in the status bar.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "CONNECTED",
            ConnectionStatus::Timeout => "TIMEOUT",
            ConnectionStatus::Disconnected => "DISCONNECTED",
        }
    }

    /// Style class, exactly one per status.
    #[must_use]
    pub const fn class(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "status-connected",
            ConnectionStatus::Timeout => "status-timeout",
            ConnectionStatus::Disconnected => "status-disconnected",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Body of `POST /fan` and `POST /light`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SwitchRequest {
    pub state: SwitchState,
}

/// Body of `POST /mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ModeRequest {
    pub mode: Mode,
}

/// Body of `POST /config`. The threshold is always Celsius.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConfigRequest {
    pub target_temp: f64,
}
