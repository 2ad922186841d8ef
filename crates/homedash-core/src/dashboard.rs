//! Dashboard state store.
//!
//! [`Dashboard`] owns everything the front-end shows: the last snapshot, the
//! display unit, the connection status, the chart, the threshold field and
//! any blocking alert. It is driven from a single task. Device events go in
//! through [`Dashboard::apply_event`]; user actions go in through the toggle
//! and threshold methods, which return the [`Command`] to hand to the worker.
//!
//! Actions never mutate the snapshot optimistically. A successful command
//! only asks for a fresh poll, and the device's answer is what gets shown.

use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tracing::{debug, info, warn};

use homedash_types::{ConnectionStatus, DeviceSnapshot, DisplayUnit, SwitchState};

use crate::chart::{ChartBuffer, DEFAULT_CHART_CAPACITY};
use crate::error::Error;
use crate::messages::{Command, DeviceEvent, PollFailure, RequestKind};
use crate::view::{DashboardView, SaveState, ThresholdInput, render};

/// Alert shown when the threshold field does not hold a number.
pub const INVALID_NUMBER_ALERT: &str = "Please enter a valid number";

/// Alert shown when a command request fails.
pub const COMMAND_FAILED_ALERT: &str = "Failed to reach device.";

/// How many status messages are kept.
const MAX_STATUS_MESSAGES: usize = 5;

/// How long a status message stays visible.
const STATUS_MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

/// Settings fixed when the dashboard is created.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardOptions {
    /// Initial display unit.
    pub unit: DisplayUnit,
    /// Number of points kept in the chart.
    pub chart_capacity: usize,
    /// Device base URL, shown in the header.
    pub base_url: String,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            unit: DisplayUnit::Celsius,
            chart_capacity: DEFAULT_CHART_CAPACITY,
            base_url: String::new(),
        }
    }
}

/// Application state for the dashboard.
#[derive(Debug)]
pub struct Dashboard {
    base_url: String,
    snapshot: Option<DeviceSnapshot>,
    last_update: Option<DateTime<Local>>,
    unit: DisplayUnit,
    status: ConnectionStatus,
    chart: ChartBuffer,
    threshold: ThresholdInput,
    save: SaveState,
    /// Blocking alert; must be dismissed before anything else happens.
    alert: Option<String>,
    /// Most recent error, shown in the help overlay.
    last_error: Option<String>,
    status_messages: Vec<(String, Instant)>,
    view: DashboardView,
}

impl Dashboard {
    /// Create a dashboard with no device state yet.
    pub fn new(options: DashboardOptions) -> Self {
        let mut dashboard = Self {
            view: DashboardView::placeholder(&options.base_url),
            base_url: options.base_url,
            snapshot: None,
            last_update: None,
            unit: options.unit,
            status: ConnectionStatus::Disconnected,
            chart: ChartBuffer::new(options.chart_capacity),
            threshold: ThresholdInput::default(),
            save: SaveState::Idle,
            alert: None,
            last_error: None,
            status_messages: Vec::new(),
        };
        dashboard.rerender();
        dashboard
    }

    // ======================================================================
    // Device events
    // ======================================================================

    /// Apply an event from the worker.
    ///
    /// Returns commands to send back to the worker (a re-poll after a
    /// successful command).
    pub fn apply_event(&mut self, event: DeviceEvent) -> Vec<Command> {
        let mut commands = Vec::new();

        match event {
            DeviceEvent::StatusFetched {
                snapshot,
                received_at,
            } => {
                debug!(?snapshot, "Applying snapshot");
                self.status = ConnectionStatus::Connected;
                self.last_update = Some(received_at);
                self.chart.append_snapshot(&snapshot, self.unit, received_at);
                self.snapshot = Some(snapshot);
            }
            DeviceEvent::PollFailed { failure, error } => {
                self.status = match failure {
                    PollFailure::Timeout => ConnectionStatus::Timeout,
                    PollFailure::Disconnected => ConnectionStatus::Disconnected,
                };
                debug!(status = %self.status, error = %error, "Poll failed, keeping last snapshot");
                self.last_error = Some(error);
            }
            DeviceEvent::CommandSucceeded { kind } => {
                if kind == RequestKind::Threshold {
                    self.save = SaveState::Idle;
                }
                self.push_status_message(format!("{} updated", capitalize(kind.name())));
                commands.push(Command::Poll);
            }
            DeviceEvent::CommandFailed { kind, error } => {
                warn!(kind = kind.name(), error = %error, "Command failed");
                if kind == RequestKind::Threshold {
                    self.save = SaveState::Idle;
                }
                self.alert = Some(COMMAND_FAILED_ALERT.to_string());
                self.push_status_message(format!(
                    "{} failed: {}",
                    capitalize(kind.name()),
                    error.chars().take(60).collect::<String>()
                ));
                self.last_error = Some(error);
            }
        }

        self.rerender();
        commands
    }

    // ======================================================================
    // User actions
    // ======================================================================

    /// Switch between Celsius and Fahrenheit.
    ///
    /// Buffered chart temperatures are rewritten in place and the current
    /// snapshot is re-rendered; nothing is fetched.
    pub fn toggle_unit(&mut self) {
        let from = self.unit;
        let to = from.toggled();
        self.chart.convert_temperatures(from, to);
        self.unit = to;
        if !self.threshold.focused {
            // Text not backed by the snapshot would otherwise be read in the new unit.
            if let Ok(value) = self.threshold.text.trim().parse::<f64>() {
                self.threshold.text = format!("{:.1}", DisplayUnit::convert(value, from, to));
            }
        }
        info!(unit = %to, "Display unit changed");
        self.push_status_message(format!("Showing temperatures in {}", to.symbol()));
        self.rerender();
    }

    /// Request the opposite of the device's fan state.
    pub fn toggle_fan(&mut self) -> Option<Command> {
        let state = self.manual_switch("Fan", |s| s.fan_state())?;
        Some(Command::SetFan { state })
    }

    /// Request the opposite of the device's light state.
    pub fn toggle_light(&mut self) -> Option<Command> {
        let state = self.manual_switch("Light", |s| s.light_state())?;
        Some(Command::SetLight { state })
    }

    /// Request the opposite of the device's mode.
    pub fn toggle_mode(&mut self) -> Option<Command> {
        let Some(snapshot) = &self.snapshot else {
            self.push_status_message("No device state yet".to_string());
            return None;
        };
        let mode = snapshot.mode.toggled();
        info!(%mode, "Requesting mode change");
        Some(Command::SetMode { mode })
    }

    /// Validate the threshold field and request a save.
    ///
    /// The field is read in the display unit and sent in °C, rounded to two
    /// decimals. Editing ends either way. Invalid input raises
    /// [`INVALID_NUMBER_ALERT`] and nothing is sent.
    pub fn update_threshold(&mut self) -> Option<Command> {
        self.threshold.focused = false;

        let celsius = match parse_threshold(&self.threshold.text, self.unit) {
            Ok(celsius) => celsius,
            Err(e) => {
                debug!(error = %e, "Rejected threshold input");
                self.alert = Some(INVALID_NUMBER_ALERT.to_string());
                self.rerender();
                return None;
            }
        };

        info!(celsius, "Saving threshold");
        self.save = SaveState::Sending;
        self.rerender();
        Some(Command::SetThreshold { celsius })
    }

    /// Start editing the threshold field.
    pub fn focus_threshold(&mut self) {
        self.threshold.focused = true;
        self.rerender();
    }

    /// Stop editing without saving. The field shows the device value again.
    pub fn blur_threshold(&mut self) {
        self.threshold.focused = false;
        self.rerender();
    }

    /// Type a character into the threshold field.
    ///
    /// Only digits, `.` and `-` are accepted, and only while editing.
    /// Returns whether the character was taken.
    pub fn threshold_input_char(&mut self, c: char) -> bool {
        if !self.threshold.focused || !(c.is_ascii_digit() || c == '.' || c == '-') {
            return false;
        }
        self.threshold.text.push(c);
        self.rerender();
        true
    }

    /// Delete the last character of the threshold field.
    pub fn threshold_backspace(&mut self) {
        if self.threshold.focused && self.threshold.text.pop().is_some() {
            self.rerender();
        }
    }

    /// Clear the blocking alert.
    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }

    // ======================================================================
    // Status messages
    // ======================================================================

    /// Add a status message to the queue.
    pub fn push_status_message(&mut self, message: String) {
        self.status_messages.push((message, Instant::now()));
        while self.status_messages.len() > MAX_STATUS_MESSAGES {
            self.status_messages.remove(0);
        }
    }

    /// Remove expired status messages.
    pub fn clean_expired_messages(&mut self) {
        self.status_messages
            .retain(|(_, created)| created.elapsed() < STATUS_MESSAGE_TIMEOUT);
    }

    /// The status message to display, if any.
    pub fn current_status_message(&self) -> Option<&str> {
        self.status_messages.last().map(|(msg, _)| msg.as_str())
    }

    // ======================================================================
    // Accessors
    // ======================================================================

    /// The view for the current state.
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Last successfully fetched snapshot.
    pub fn snapshot(&self) -> Option<&DeviceSnapshot> {
        self.snapshot.as_ref()
    }

    /// When the last snapshot arrived.
    pub fn last_update(&self) -> Option<DateTime<Local>> {
        self.last_update
    }

    pub fn unit(&self) -> DisplayUnit {
        self.unit
    }

    pub fn status(&self) -> ConnectionStatus {
        self.status
    }

    pub fn chart(&self) -> &ChartBuffer {
        &self.chart
    }

    /// Legend for the chart's temperature series.
    pub fn temperature_label(&self) -> String {
        ChartBuffer::temperature_label(self.unit)
    }

    pub fn threshold_input(&self) -> &ThresholdInput {
        &self.threshold
    }

    pub fn is_editing_threshold(&self) -> bool {
        self.threshold.focused
    }

    pub fn save_state(&self) -> SaveState {
        self.save
    }

    /// The blocking alert, if one is showing.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ======================================================================
    // Internals
    // ======================================================================

    /// Target state for a manual fan/light toggle, or `None` with a status
    /// message when manual control is not possible.
    fn manual_switch(
        &mut self,
        name: &str,
        current: impl Fn(&DeviceSnapshot) -> SwitchState,
    ) -> Option<SwitchState> {
        let Some(snapshot) = &self.snapshot else {
            self.push_status_message("No device state yet".to_string());
            return None;
        };
        if snapshot.mode.is_auto() {
            self.push_status_message(format!("{} is controlled automatically in auto mode", name));
            return None;
        }
        let target = current(snapshot).toggled();
        info!(state = %target, "Requesting {} change", name.to_lowercase());
        Some(target)
    }

    fn rerender(&mut self) {
        self.view = render(
            self.snapshot.as_ref(),
            self.unit,
            self.status,
            &self.threshold,
            self.save,
            &self.base_url,
        );
        // The field holds whatever was last drawn into it.
        self.threshold.text.clone_from(&self.view.threshold);
    }
}

/// Parse threshold text in `unit` into °C rounded to two decimals.
pub fn parse_threshold(text: &str, unit: DisplayUnit) -> Result<f64, Error> {
    let value: f64 = text
        .trim()
        .parse()
        .map_err(|_| Error::InvalidThreshold(text.to_string()))?;
    if !value.is_finite() {
        return Err(Error::InvalidThreshold(text.to_string()));
    }
    Ok(round2(unit.to_storage(value)))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_types::Mode;

    fn scenario_snapshot() -> DeviceSnapshot {
        DeviceSnapshot {
            temp: Some(21.0),
            humidity: Some(40.0),
            presence: false,
            fan: false,
            light: true,
            mode: Mode::Manual,
            target_temp: Some(22.0),
        }
    }

    fn fetched(snapshot: DeviceSnapshot) -> DeviceEvent {
        DeviceEvent::StatusFetched {
            snapshot,
            received_at: Local::now(),
        }
    }

    fn dashboard_with(snapshot: DeviceSnapshot) -> Dashboard {
        let mut dashboard = Dashboard::new(DashboardOptions {
            base_url: "http://192.168.0.114:5000".to_string(),
            ..Default::default()
        });
        assert!(dashboard.apply_event(fetched(snapshot)).is_empty());
        dashboard
    }

    #[test]
    fn test_initial_state() {
        let dashboard = Dashboard::new(DashboardOptions::default());
        assert!(dashboard.snapshot().is_none());
        assert_eq!(dashboard.status(), ConnectionStatus::Disconnected);
        assert_eq!(dashboard.view().temperature, "--");
        assert!(dashboard.chart().is_empty());
    }

    #[test]
    fn test_status_fetched_updates_view_and_chart() {
        let dashboard = dashboard_with(scenario_snapshot());
        let view = dashboard.view();

        assert_eq!(dashboard.status(), ConnectionStatus::Connected);
        assert_eq!(view.temperature, "21.0");
        assert_eq!(view.humidity, "40.0");
        assert_eq!(view.presence, "None");
        assert_eq!(view.fan.caption, "Turn On");
        assert_eq!(view.light.caption, "Turn Off");
        assert_eq!(view.threshold, "22.0");
        assert_eq!(dashboard.threshold_input().text, "22.0");
        assert_eq!(dashboard.chart().len(), 1);
    }

    #[test]
    fn test_toggle_unit_rerenders_without_fetch() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.toggle_unit();

        assert_eq!(dashboard.unit(), DisplayUnit::Fahrenheit);
        assert_eq!(dashboard.view().temperature, "69.8");
        assert_eq!(dashboard.view().threshold, "71.6");
        assert_eq!(dashboard.temperature_label(), "Temp (°F)");
        assert!((dashboard.chart().temperatures()[0] - 69.8).abs() < 1e-9);
        // The snapshot itself stays in °C.
        assert_eq!(dashboard.snapshot().unwrap().temp, Some(21.0));

        dashboard.toggle_unit();
        assert_eq!(dashboard.view().temperature, "21.0");
        assert!((dashboard.chart().temperatures()[0] - 21.0).abs() < 1e-9);
    }

    #[test]
    fn test_toggle_unit_converts_threshold_without_target() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.apply_event(fetched(DeviceSnapshot {
            target_temp: None,
            ..scenario_snapshot()
        }));
        assert_eq!(dashboard.view().threshold, "22.0");

        dashboard.toggle_unit();
        assert_eq!(dashboard.view().threshold, "71.6");
        assert_eq!(dashboard.view().unit_symbol, "°F");

        dashboard.focus_threshold();
        assert_eq!(
            dashboard.update_threshold(),
            Some(Command::SetThreshold { celsius: 22.0 })
        );
    }

    #[test]
    fn test_update_threshold_converts_to_celsius() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.toggle_unit();
        dashboard.focus_threshold();
        for _ in 0..4 {
            dashboard.threshold_backspace();
        }
        for c in "75.2".chars() {
            assert!(dashboard.threshold_input_char(c));
        }

        let cmd = dashboard.update_threshold();
        assert_eq!(cmd, Some(Command::SetThreshold { celsius: 24.0 }));
        assert_eq!(dashboard.save_state(), SaveState::Sending);
        assert_eq!(dashboard.view().save_caption, "...");
        assert!(!dashboard.is_editing_threshold());
    }

    #[test]
    fn test_update_threshold_rejects_invalid_input() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.focus_threshold();
        for _ in 0..4 {
            dashboard.threshold_backspace();
        }
        dashboard.threshold_input_char('-');
        dashboard.threshold_input_char('.');

        assert_eq!(dashboard.update_threshold(), None);
        assert_eq!(dashboard.alert(), Some(INVALID_NUMBER_ALERT));
        assert_eq!(dashboard.save_state(), SaveState::Idle);

        dashboard.dismiss_alert();
        assert_eq!(dashboard.alert(), None);
    }

    #[test]
    fn test_threshold_input_filters_characters() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        assert!(!dashboard.threshold_input_char('1'), "not editing");

        dashboard.focus_threshold();
        assert!(!dashboard.threshold_input_char('x'));
        assert!(dashboard.threshold_input_char('5'));
        assert_eq!(dashboard.threshold_input().text, "22.05");
    }

    #[test]
    fn test_focus_guard_survives_poll() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.focus_threshold();
        dashboard.threshold_backspace();
        dashboard.threshold_backspace();
        dashboard.threshold_backspace();

        dashboard.apply_event(fetched(DeviceSnapshot {
            temp: Some(23.0),
            target_temp: Some(25.0),
            ..scenario_snapshot()
        }));
        assert_eq!(dashboard.view().threshold, "2");
        assert_eq!(dashboard.view().temperature, "23.0");

        dashboard.blur_threshold();
        assert_eq!(dashboard.view().threshold, "25.0");
    }

    #[test]
    fn test_toggles_read_snapshot() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        assert_eq!(
            dashboard.toggle_fan(),
            Some(Command::SetFan {
                state: SwitchState::On
            })
        );
        assert_eq!(
            dashboard.toggle_light(),
            Some(Command::SetLight {
                state: SwitchState::Off
            })
        );
        assert_eq!(
            dashboard.toggle_mode(),
            Some(Command::SetMode { mode: Mode::Auto })
        );
        // Nothing changes until the device confirms via a poll.
        assert!(!dashboard.snapshot().unwrap().fan);
    }

    #[test]
    fn test_toggles_blocked_in_auto_mode() {
        let mut dashboard = dashboard_with(DeviceSnapshot {
            mode: Mode::Auto,
            ..scenario_snapshot()
        });
        assert_eq!(dashboard.toggle_fan(), None);
        assert_eq!(dashboard.toggle_light(), None);
        assert!(dashboard.current_status_message().unwrap().contains("auto mode"));
        assert_eq!(
            dashboard.toggle_mode(),
            Some(Command::SetMode { mode: Mode::Manual })
        );
    }

    #[test]
    fn test_toggles_need_snapshot() {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        assert_eq!(dashboard.toggle_fan(), None);
        assert_eq!(dashboard.toggle_mode(), None);
        assert_eq!(dashboard.current_status_message(), Some("No device state yet"));
    }

    #[test]
    fn test_command_success_requests_poll() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.update_threshold();
        assert_eq!(dashboard.save_state(), SaveState::Sending);

        let commands = dashboard.apply_event(DeviceEvent::CommandSucceeded {
            kind: RequestKind::Threshold,
        });
        assert_eq!(commands, [Command::Poll]);
        assert_eq!(dashboard.save_state(), SaveState::Idle);
        assert_eq!(dashboard.view().save_caption, "Save");
    }

    #[test]
    fn test_command_failure_alerts_without_mutation() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        let before = dashboard.snapshot().cloned();

        let commands = dashboard.apply_event(DeviceEvent::CommandFailed {
            kind: RequestKind::Fan,
            error: "Device error 500: Internal Server Error".to_string(),
        });
        assert!(commands.is_empty());
        assert_eq!(dashboard.alert(), Some(COMMAND_FAILED_ALERT));
        assert_eq!(dashboard.snapshot().cloned(), before);
        assert_eq!(dashboard.view().fan.caption, "Turn On");
    }

    #[test]
    fn test_threshold_failure_restores_save_caption() {
        let mut dashboard = dashboard_with(scenario_snapshot());
        dashboard.update_threshold();

        dashboard.apply_event(DeviceEvent::CommandFailed {
            kind: RequestKind::Threshold,
            error: "Device not reachable".to_string(),
        });
        assert_eq!(dashboard.save_state(), SaveState::Idle);
        assert_eq!(dashboard.view().save_caption, "Save");
        assert_eq!(dashboard.alert(), Some(COMMAND_FAILED_ALERT));
    }

    #[test]
    fn test_poll_failures_keep_snapshot() {
        let mut dashboard = dashboard_with(scenario_snapshot());

        dashboard.apply_event(DeviceEvent::PollFailed {
            failure: PollFailure::Timeout,
            error: "timed out".to_string(),
        });
        assert_eq!(dashboard.status(), ConnectionStatus::Timeout);
        assert_eq!(dashboard.view().status_label, "TIMEOUT");
        assert_eq!(dashboard.view().temperature, "21.0");

        dashboard.apply_event(DeviceEvent::PollFailed {
            failure: PollFailure::Disconnected,
            error: "refused".to_string(),
        });
        assert_eq!(dashboard.status(), ConnectionStatus::Disconnected);
        assert_eq!(dashboard.last_error(), Some("refused"));
        assert_eq!(dashboard.chart().len(), 1);
    }

    #[test]
    fn test_parse_threshold() {
        assert_eq!(parse_threshold("22", DisplayUnit::Celsius).unwrap(), 22.0);
        assert_eq!(parse_threshold(" 75.2 ", DisplayUnit::Fahrenheit).unwrap(), 24.0);
        assert_eq!(parse_threshold("21.456", DisplayUnit::Celsius).unwrap(), 21.46);
        assert!(parse_threshold("", DisplayUnit::Celsius).is_err());
        assert!(parse_threshold("abc", DisplayUnit::Celsius).is_err());
        assert!(parse_threshold("NaN", DisplayUnit::Celsius).is_err());
    }

    #[test]
    fn test_status_messages_are_capped() {
        let mut dashboard = Dashboard::new(DashboardOptions::default());
        for i in 0..10 {
            dashboard.push_status_message(format!("message {}", i));
        }
        assert_eq!(dashboard.current_status_message(), Some("message 9"));
        dashboard.clean_expired_messages();
        assert_eq!(dashboard.current_status_message(), Some("message 9"));
    }
}
