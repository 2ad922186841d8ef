//! View model for the dashboard.
//!
//! [`render`] projects the current state onto a [`DashboardView`]: every
//! string, style class and enabled flag the front-end draws. It is a pure
//! function, so rendering the same inputs twice yields equal views and the
//! terminal UI never has to inspect device state itself.

use homedash_types::{ConnectionStatus, DeviceSnapshot, DisplayUnit, SwitchState};

/// Text shown for a missing reading.
pub const PLACEHOLDER: &str = "--";

/// Styling hint for the presence indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    /// Presence detected: green and bold.
    Positive,
    /// Nobody present: grey.
    Muted,
}

/// State of the threshold save button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    /// A threshold save is in flight.
    Sending,
}

impl SaveState {
    /// Button caption for this state.
    pub const fn caption(self) -> &'static str {
        match self {
            SaveState::Idle => "Save",
            SaveState::Sending => "...",
        }
    }
}

/// The editable threshold field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ThresholdInput {
    /// Current contents, in the display unit.
    pub text: String,
    /// Whether the user is editing the field.
    pub focused: bool,
}

/// How a fan or light control is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchView {
    /// `ON` or `OFF`.
    pub label: &'static str,
    /// `on` or `off`.
    pub class: &'static str,
    /// The action the button performs: `Turn Off` when on, `Turn On` when off.
    pub caption: &'static str,
    /// Disabled while the device is in auto mode or nothing is known yet.
    pub disabled: bool,
}

impl SwitchView {
    fn new(state: SwitchState, disabled: bool) -> Self {
        match state {
            SwitchState::On => Self {
                label: "ON",
                class: "on",
                caption: "Turn Off",
                disabled,
            },
            SwitchState::Off => Self {
                label: "OFF",
                class: "off",
                caption: "Turn On",
                disabled,
            },
        }
    }
}

/// Everything the front-end draws for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Device base URL shown in the header.
    pub device_url: String,
    /// Temperature in the display unit, one decimal, or `--`.
    pub temperature: String,
    /// `°C` or `°F`.
    pub unit_symbol: &'static str,
    /// Humidity, one decimal, or `--`.
    pub humidity: String,
    /// `DETECTED` or `None`.
    pub presence: &'static str,
    pub presence_emphasis: Emphasis,
    pub fan: SwitchView,
    pub light: SwitchView,
    /// Checked when the device is in auto mode.
    pub auto_checked: bool,
    /// Contents of the threshold field.
    pub threshold: String,
    /// Whether the threshold field has focus.
    pub threshold_focused: bool,
    /// `CONNECTED`, `TIMEOUT` or `DISCONNECTED`.
    pub status_label: &'static str,
    /// Exclusive style class matching `status_label`.
    pub status_class: &'static str,
    /// Caption of the unit toggle, e.g. `Switch to °F`.
    pub unit_switch_caption: String,
    /// `Save` or `...`.
    pub save_caption: &'static str,
}

impl DashboardView {
    /// The view before any snapshot has been received.
    pub fn placeholder(base_url: &str) -> Self {
        render(
            None,
            DisplayUnit::default(),
            ConnectionStatus::default(),
            &ThresholdInput::default(),
            SaveState::Idle,
            base_url,
        )
    }
}

/// Project state onto a view.
///
/// While `threshold.focused` is set, the field's text is passed through
/// untouched so a poll never overwrites what the user is typing. The same
/// happens when the snapshot has no `target_temp`.
pub fn render(
    snapshot: Option<&DeviceSnapshot>,
    unit: DisplayUnit,
    status: ConnectionStatus,
    threshold: &ThresholdInput,
    save: SaveState,
    base_url: &str,
) -> DashboardView {
    let reading = |value: Option<f64>| {
        value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{:.1}", v))
    };

    let temperature = reading(snapshot.and_then(|s| s.temp).map(|c| unit.to_display(c)));
    let humidity = reading(snapshot.and_then(|s| s.humidity));

    let presence = snapshot.is_some_and(|s| s.presence);
    let (presence, presence_emphasis) = if presence {
        ("DETECTED", Emphasis::Positive)
    } else {
        ("None", Emphasis::Muted)
    };

    let auto_checked = snapshot.is_some_and(|s| s.mode.is_auto());
    let locked = snapshot.is_none() || auto_checked;
    let fan = SwitchView::new(
        snapshot.map_or(SwitchState::Off, |s| s.fan_state()),
        locked,
    );
    let light = SwitchView::new(
        snapshot.map_or(SwitchState::Off, |s| s.light_state()),
        locked,
    );

    let threshold_text = match snapshot.and_then(|s| s.target_temp) {
        Some(target) if !threshold.focused => format!("{:.1}", unit.to_display(target)),
        _ => threshold.text.clone(),
    };

    DashboardView {
        device_url: base_url.to_string(),
        temperature,
        unit_symbol: unit.symbol(),
        humidity,
        presence,
        presence_emphasis,
        fan,
        light,
        auto_checked,
        threshold: threshold_text,
        threshold_focused: threshold.focused,
        status_label: status.label(),
        status_class: status.class(),
        unit_switch_caption: unit.switch_caption(),
        save_caption: save.caption(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_types::Mode;

    const URL: &str = "http://192.168.0.114:5000";

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

    fn render_with(snapshot: &DeviceSnapshot, unit: DisplayUnit) -> DashboardView {
        render(
            Some(snapshot),
            unit,
            ConnectionStatus::Connected,
            &ThresholdInput::default(),
            SaveState::Idle,
            URL,
        )
    }

    #[test]
    fn test_render_scenario_celsius() {
        let view = render_with(&scenario_snapshot(), DisplayUnit::Celsius);

        assert_eq!(view.temperature, "21.0");
        assert_eq!(view.unit_symbol, "°C");
        assert_eq!(view.humidity, "40.0");
        assert_eq!(view.presence, "None");
        assert_eq!(view.presence_emphasis, Emphasis::Muted);
        assert_eq!(view.fan.caption, "Turn On");
        assert_eq!(view.fan.label, "OFF");
        assert_eq!(view.light.caption, "Turn Off");
        assert_eq!(view.light.class, "on");
        assert_eq!(view.threshold, "22.0");
        assert!(!view.auto_checked);
        assert!(!view.fan.disabled);
        assert_eq!(view.status_label, "CONNECTED");
        assert_eq!(view.status_class, "status-connected");
        assert_eq!(view.unit_switch_caption, "Switch to °F");
        assert_eq!(view.save_caption, "Save");
        assert_eq!(view.device_url, URL);
    }

    #[test]
    fn test_render_scenario_fahrenheit() {
        let view = render_with(&scenario_snapshot(), DisplayUnit::Fahrenheit);
        assert_eq!(view.temperature, "69.8");
        assert_eq!(view.threshold, "71.6");
        assert_eq!(view.unit_symbol, "°F");
        assert_eq!(view.unit_switch_caption, "Switch to °C");
    }

    #[test]
    fn test_render_is_idempotent() {
        let snapshot = scenario_snapshot();
        let first = render_with(&snapshot, DisplayUnit::Fahrenheit);
        let second = render_with(&snapshot, DisplayUnit::Fahrenheit);
        assert_eq!(first, second);
    }

    #[test]
    fn test_render_missing_readings() {
        let snapshot = DeviceSnapshot {
            presence: true,
            ..Default::default()
        };
        let view = render_with(&snapshot, DisplayUnit::Celsius);
        assert_eq!(view.temperature, PLACEHOLDER);
        assert_eq!(view.humidity, PLACEHOLDER);
        assert_eq!(view.presence, "DETECTED");
        assert_eq!(view.presence_emphasis, Emphasis::Positive);
    }

    #[test]
    fn test_focus_guard_keeps_input() {
        let input = ThresholdInput {
            text: "2".to_string(),
            focused: true,
        };
        let view = render(
            Some(&scenario_snapshot()),
            DisplayUnit::Celsius,
            ConnectionStatus::Connected,
            &input,
            SaveState::Idle,
            URL,
        );
        assert_eq!(view.threshold, "2");
        assert!(view.threshold_focused);
        // Other fields still update.
        assert_eq!(view.temperature, "21.0");
    }

    #[test]
    fn test_missing_target_keeps_input() {
        let snapshot = DeviceSnapshot {
            target_temp: None,
            ..scenario_snapshot()
        };
        let input = ThresholdInput {
            text: "23.5".to_string(),
            focused: false,
        };
        let view = render(
            Some(&snapshot),
            DisplayUnit::Celsius,
            ConnectionStatus::Connected,
            &input,
            SaveState::Idle,
            URL,
        );
        assert_eq!(view.threshold, "23.5");
    }

    #[test]
    fn test_auto_mode_disables_switches() {
        for (fan, light) in [(false, false), (true, false), (false, true), (true, true)] {
            let snapshot = DeviceSnapshot {
                fan,
                light,
                mode: Mode::Auto,
                ..scenario_snapshot()
            };
            let view = render_with(&snapshot, DisplayUnit::Celsius);
            assert!(view.auto_checked);
            assert!(view.fan.disabled);
            assert!(view.light.disabled);
        }
    }

    #[test]
    fn test_status_and_save_captions() {
        let view = render(
            Some(&scenario_snapshot()),
            DisplayUnit::Celsius,
            ConnectionStatus::Timeout,
            &ThresholdInput::default(),
            SaveState::Sending,
            URL,
        );
        assert_eq!(view.status_label, "TIMEOUT");
        assert_eq!(view.status_class, "status-timeout");
        assert_eq!(view.save_caption, "...");
    }

    #[test]
    fn test_placeholder() {
        let view = DashboardView::placeholder(URL);
        assert_eq!(view.temperature, PLACEHOLDER);
        assert_eq!(view.humidity, PLACEHOLDER);
        assert_eq!(view.status_label, "DISCONNECTED");
        assert!(view.fan.disabled);
        assert!(view.threshold.is_empty());
    }
}
