//! Message types for UI/worker communication.
//!
//! ```text
//! +------------------+     Command      +------------------+
//! |    UI loop       | --------------> |  DeviceWorker    |
//! |   (Dashboard)    |                 |  (tokio task)    |
//! |                  | <-------------- |                  |
//! +------------------+   DeviceEvent   +------------------+
//! ```
//!
//! - [`Command`]: Messages sent from the UI loop to the background worker
//! - [`DeviceEvent`]: Events sent from the worker back to the UI loop
//!
//! The worker only forwards the completion of the most recent request of
//! each [`RequestKind`]; superseded completions never become events.

use chrono::{DateTime, Local};

use homedash_types::{DeviceSnapshot, Mode, SwitchState};

/// Commands sent from the UI loop to the background worker.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Fetch `/status` now, in addition to the periodic schedule.
    Poll,

    /// Switch the fan on or off.
    SetFan {
        /// Target state.
        state: SwitchState,
    },

    /// Switch the light on or off.
    SetLight {
        /// Target state.
        state: SwitchState,
    },

    /// Change the operating mode.
    SetMode {
        /// Target mode.
        mode: Mode,
    },

    /// Save a new automation threshold.
    SetThreshold {
        /// Threshold in °C. Never a display-unit value.
        celsius: f64,
    },

    /// Shut down the worker.
    Shutdown,
}

impl Command {
    /// The request kind this command occupies, if it issues a request.
    pub fn kind(&self) -> Option<RequestKind> {
        match self {
            Command::Poll => Some(RequestKind::Status),
            Command::SetFan { .. } => Some(RequestKind::Fan),
            Command::SetLight { .. } => Some(RequestKind::Light),
            Command::SetMode { .. } => Some(RequestKind::Mode),
            Command::SetThreshold { .. } => Some(RequestKind::Threshold),
            Command::Shutdown => None,
        }
    }
}

/// Kinds of outstanding requests. At most one of each is current at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestKind {
    Status,
    Fan,
    Light,
    Mode,
    Threshold,
}

impl RequestKind {
    /// Every request kind.
    pub const ALL: [RequestKind; 5] = [
        RequestKind::Status,
        RequestKind::Fan,
        RequestKind::Light,
        RequestKind::Mode,
        RequestKind::Threshold,
    ];

    /// Endpoint path on the device.
    pub const fn path(self) -> &'static str {
        match self {
            RequestKind::Status => "/status",
            RequestKind::Fan => "/fan",
            RequestKind::Light => "/light",
            RequestKind::Mode => "/mode",
            RequestKind::Threshold => "/config",
        }
    }

    /// Short human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            RequestKind::Status => "status",
            RequestKind::Fan => "fan",
            RequestKind::Light => "light",
            RequestKind::Mode => "mode",
            RequestKind::Threshold => "threshold",
        }
    }
}

/// Why a status poll failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollFailure {
    /// The poll deadline expired.
    Timeout,
    /// Any other transport or response error.
    Disconnected,
}

/// Events sent from the background worker to the UI loop.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceEvent {
    /// A status poll succeeded.
    StatusFetched {
        /// The new snapshot.
        snapshot: DeviceSnapshot,
        /// Local time the response was received.
        received_at: DateTime<Local>,
    },

    /// A status poll failed.
    PollFailed {
        /// Failure classification.
        failure: PollFailure,
        /// Description of the error.
        error: String,
    },

    /// A command request returned a 2xx response.
    CommandSucceeded {
        /// Which command completed.
        kind: RequestKind,
    },

    /// A command request failed (non-2xx or transport error).
    CommandFailed {
        /// Which command failed.
        kind: RequestKind,
        /// Description of the error.
        error: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_kinds() {
        assert_eq!(Command::Poll.kind(), Some(RequestKind::Status));
        assert_eq!(
            Command::SetFan {
                state: SwitchState::On
            }
            .kind(),
            Some(RequestKind::Fan)
        );
        assert_eq!(
            Command::SetThreshold { celsius: 22.0 }.kind(),
            Some(RequestKind::Threshold)
        );
        assert_eq!(Command::Shutdown.kind(), None);
    }

    #[test]
    fn test_request_paths() {
        let paths: Vec<_> = RequestKind::ALL.iter().map(|k| k.path()).collect();
        assert_eq!(paths, ["/status", "/fan", "/light", "/mode", "/config"]);
    }
}
