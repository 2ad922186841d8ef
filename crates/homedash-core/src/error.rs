//! Error types for homedash-core.
//!
//! Every error is local to a single request attempt. Nothing here is retried
//! automatically: a failed poll is simply superseded by the next scheduled
//! one, and a failed command is reported to the user.
//!
//! | Error | Poll outcome | Command outcome |
//! |-------|--------------|-----------------|
//! | [`Error::Timeout`] | `TIMEOUT` status, snapshot kept | not applicable |
//! | [`Error::NotReachable`] | `DISCONNECTED`, snapshot kept | failure alert |
//! | [`Error::Api`] | `DISCONNECTED`, snapshot kept | failure alert |
//! | [`Error::Request`] | `DISCONNECTED`, snapshot kept | failure alert |
//! | [`Error::InvalidThreshold`] | not applicable | alert, nothing sent |

use std::time::Duration;

use thiserror::Error;

use crate::messages::PollFailure;

/// Errors that can occur when talking to the device.
///
/// This enum is marked `#[non_exhaustive]` to allow adding new error variants
/// in future versions without breaking downstream code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// The device is not reachable at the configured URL.
    #[error("Device not reachable at {url}: {source}")]
    NotReachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// HTTP request or response decoding failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The device answered with a non-success status.
    #[error("Device error {status}: {message}")]
    Api { status: u16, message: String },

    /// Invalid base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Operation exceeded its deadline.
    #[error("Operation '{operation}' timed out after {duration:?}")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The deadline that was exceeded.
        duration: Duration,
    },

    /// Connection failed for a reason not tied to an HTTP error.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Threshold text could not be parsed as a number.
    #[error("Invalid threshold '{0}': expected a decimal number")]
    InvalidThreshold(String),
}

impl Error {
    /// Create a timeout error with operation context.
    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        Self::Timeout {
            operation: operation.into(),
            duration,
        }
    }

    /// Whether the error is a deadline expiry.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::NotReachable { source, .. } | Self::Request(source) => source.is_timeout(),
            _ => false,
        }
    }

    /// Classify the error as a poll outcome.
    pub fn poll_failure(&self) -> PollFailure {
        if self.is_timeout() {
            PollFailure::Timeout
        } else {
            PollFailure::Disconnected
        }
    }
}

/// Result type alias using homedash-core's Error type.
pub type Result<T> = std::result::Result<T, Error>;
