//! Error types for value parsing in homedash-types.

use thiserror::Error;

/// Errors that can occur when parsing user-supplied or wire values.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ParseError {
    /// Unknown operating mode string.
    #[error("Invalid mode '{0}': expected 'auto' or 'manual'")]
    InvalidMode(String),

    /// Unknown on/off state string.
    #[error("Invalid switch state '{0}': expected 'on' or 'off'")]
    InvalidSwitchState(String),

    /// Unknown temperature unit string.
    #[error("Invalid temperature unit '{0}': expected 'c' or 'f'")]
    InvalidUnit(String),
}
