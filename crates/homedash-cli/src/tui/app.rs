//! Application state for the TUI.
//!
//! [`App`] wraps the [`Dashboard`] state store with the bits that only the
//! terminal front-end cares about: quitting, the help overlay and the
//! receiving end of the worker's event channel.

use tokio::sync::mpsc;

use homedash_core::{Command, Dashboard, DeviceEvent};

pub struct App {
    /// Device state, view model and alerts.
    pub dashboard: Dashboard,
    /// Events from the device worker.
    pub event_rx: mpsc::Receiver<DeviceEvent>,
    pub should_quit: bool,
    pub show_help: bool,
}

impl App {
    pub fn new(dashboard: Dashboard, event_rx: mpsc::Receiver<DeviceEvent>) -> Self {
        Self {
            dashboard,
            event_rx,
            should_quit: false,
            show_help: false,
        }
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Apply every pending worker event.
    ///
    /// Returns commands to send back to the worker.
    pub fn drain_events(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            commands.extend(self.dashboard.apply_event(event));
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_core::{DashboardOptions, RequestKind};

    #[test]
    fn test_drain_events_collects_commands() {
        let (tx, rx) = mpsc::channel(8);
        let mut app = App::new(Dashboard::new(DashboardOptions::default()), rx);

        tx.try_send(DeviceEvent::CommandSucceeded {
            kind: RequestKind::Fan,
        })
        .unwrap();
        tx.try_send(DeviceEvent::CommandSucceeded {
            kind: RequestKind::Light,
        })
        .unwrap();

        assert_eq!(app.drain_events(), [Command::Poll, Command::Poll]);
        assert!(app.drain_events().is_empty());
    }

    #[test]
    fn test_toggle_help() {
        let (_tx, rx) = mpsc::channel(1);
        let mut app = App::new(Dashboard::new(DashboardOptions::default()), rx);
        assert!(!app.show_help);
        app.toggle_help();
        assert!(app.show_help);
        assert!(!app.should_quit());
    }
}
