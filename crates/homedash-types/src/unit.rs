//! Temperature display units.
//!
//! The device always speaks Celsius. [`DisplayUnit`] only decides how values
//! are shown to the user and how user input is interpreted before it is sent
//! back.

use core::fmt;
use core::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

/// Unit used to present temperatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DisplayUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl DisplayUnit {
    /// Convert a Celsius value into this unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use homedash_types::DisplayUnit;
    ///
    /// assert_eq!(DisplayUnit::Celsius.to_display(21.0), 21.0);
    /// assert!((DisplayUnit::Fahrenheit.to_display(21.0) - 69.8).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn to_display(self, celsius: f64) -> f64 {
        match self {
            DisplayUnit::Celsius => celsius,
            DisplayUnit::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }

    /// Convert a value expressed in this unit back to Celsius.
    #[must_use]
    pub fn to_storage(self, display: f64) -> f64 {
        match self {
            DisplayUnit::Celsius => display,
            DisplayUnit::Fahrenheit => (display - 32.0) * 5.0 / 9.0,
        }
    }

    /// Convert directly between two display units.
    ///
    /// Used to rewrite already-buffered values when the unit is toggled.
    #[must_use]
    pub fn convert(value: f64, from: DisplayUnit, to: DisplayUnit) -> f64 {
        match (from, to) {
            (DisplayUnit::Celsius, DisplayUnit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
            (DisplayUnit::Fahrenheit, DisplayUnit::Celsius) => (value - 32.0) * 5.0 / 9.0,
            _ => value,
        }
    }

    /// The other unit.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            DisplayUnit::Celsius => DisplayUnit::Fahrenheit,
            DisplayUnit::Fahrenheit => DisplayUnit::Celsius,
        }
    }

    /// Degree symbol with unit letter.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            DisplayUnit::Celsius => "°C",
            DisplayUnit::Fahrenheit => "°F",
        }
    }

    /// Caption of the control that switches to the other unit.
    #[must_use]
    pub fn switch_caption(self) -> String {
        format!("Switch to {}", self.toggled().symbol())
    }
}

impl fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for DisplayUnit {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "c" | "celsius" | "°c" => Ok(DisplayUnit::Celsius),
            "f" | "fahrenheit" | "°f" => Ok(DisplayUnit::Fahrenheit),
            _ => Err(ParseError::InvalidUnit(s.to_string())),
        }
    }
}
