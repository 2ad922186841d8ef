//! Output formatting for text and JSON.

use anyhow::Result;
use owo_colors::OwoColorize;
use serde::Serialize;

use homedash_core::{DashboardView, DeviceSnapshot, DisplayUnit};

/// Formatting options for output.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatOptions {
    /// Disable colored output.
    pub no_color: bool,
    /// Unit for temperatures.
    pub unit: DisplayUnit,
}

impl FormatOptions {
    pub fn new(no_color: bool, unit: DisplayUnit) -> Self {
        Self { no_color, unit }
    }

    /// Colors are on unless disabled here or via `NO_COLOR`.
    pub fn colors_enabled(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none()
    }
}

/// Machine-readable status output.
#[derive(Debug, Serialize)]
pub struct StatusJson<'a> {
    pub device_url: &'a str,
    pub unit: &'static str,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub presence: bool,
    pub fan: &'static str,
    pub light: &'static str,
    pub mode: &'static str,
    pub target_temp: Option<f64>,
}

/// Format a snapshot as JSON. Temperatures are in `opts.unit`.
pub fn format_status_json(
    device_url: &str,
    snapshot: &DeviceSnapshot,
    opts: &FormatOptions,
) -> Result<String> {
    let unit = opts.unit;
    let output = StatusJson {
        device_url,
        unit: unit.symbol(),
        temperature: snapshot.temp.map(|c| round1(unit.to_display(c))),
        humidity: snapshot.humidity,
        presence: snapshot.presence,
        fan: snapshot.fan_state().as_str(),
        light: snapshot.light_state().as_str(),
        mode: snapshot.mode.as_str(),
        target_temp: snapshot.target_temp.map(|c| round1(unit.to_display(c))),
    };
    Ok(serde_json::to_string_pretty(&output)? + "\n")
}

/// Format a rendered view as multi-line text.
pub fn format_status_text(view: &DashboardView, opts: &FormatOptions) -> String {
    let colors = opts.colors_enabled();
    let switch = |label: &str| -> String {
        if !colors {
            label.to_string()
        } else if label == "ON" {
            label.green().bold().to_string()
        } else {
            label.dimmed().to_string()
        }
    };
    let presence = if !colors {
        view.presence.to_string()
    } else if view.presence == "DETECTED" {
        view.presence.green().bold().to_string()
    } else {
        view.presence.dimmed().to_string()
    };
    let mode = if view.auto_checked { "auto" } else { "manual" };

    let mut out = String::new();
    out.push_str(&format!("Device:      {}\n", view.device_url));
    out.push_str(&format!(
        "Temperature: {} {}\n",
        view.temperature, view.unit_symbol
    ));
    out.push_str(&format!("Humidity:    {} %\n", view.humidity));
    out.push_str(&format!("Presence:    {}\n", presence));
    out.push_str(&format!("Fan:         {}\n", switch(view.fan.label)));
    out.push_str(&format!("Light:       {}\n", switch(view.light.label)));
    out.push_str(&format!("Mode:        {}\n", mode));
    out.push_str(&format!(
        "Threshold:   {} {}\n",
        if view.threshold.is_empty() {
            homedash_core::PLACEHOLDER
        } else {
            view.threshold.as_str()
        },
        view.unit_symbol
    ));
    out
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use homedash_core::{ConnectionStatus, Mode, SaveState, ThresholdInput, render};

    fn snapshot() -> DeviceSnapshot {
        DeviceSnapshot {
            temp: Some(21.0),
            humidity: Some(40.0),
            presence: true,
            fan: false,
            light: true,
            mode: Mode::Auto,
            target_temp: Some(22.0),
        }
    }

    fn view(unit: DisplayUnit) -> DashboardView {
        render(
            Some(&snapshot()),
            unit,
            ConnectionStatus::Connected,
            &ThresholdInput::default(),
            SaveState::Idle,
            "http://192.168.0.114:5000",
        )
    }

    #[test]
    fn test_format_status_text_plain() {
        let opts = FormatOptions::new(true, DisplayUnit::Celsius);
        let text = format_status_text(&view(DisplayUnit::Celsius), &opts);

        assert!(text.contains("Temperature: 21.0 °C"));
        assert!(text.contains("Humidity:    40.0 %"));
        assert!(text.contains("Presence:    DETECTED"));
        assert!(text.contains("Fan:         OFF"));
        assert!(text.contains("Light:       ON"));
        assert!(text.contains("Mode:        auto"));
        assert!(text.contains("Threshold:   22.0 °C"));
    }

    #[test]
    fn test_format_status_text_fahrenheit() {
        let opts = FormatOptions::new(true, DisplayUnit::Fahrenheit);
        let text = format_status_text(&view(DisplayUnit::Fahrenheit), &opts);
        assert!(text.contains("Temperature: 69.8 °F"));
        assert!(text.contains("Threshold:   71.6 °F"));
    }

    #[test]
    fn test_format_status_json() {
        let opts = FormatOptions::new(true, DisplayUnit::Fahrenheit);
        let json = format_status_json("http://device", &snapshot(), &opts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["device_url"], "http://device");
        assert_eq!(value["unit"], "°F");
        assert_eq!(value["temperature"], 69.8);
        assert_eq!(value["target_temp"], 71.6);
        assert_eq!(value["fan"], "off");
        assert_eq!(value["light"], "on");
        assert_eq!(value["mode"], "auto");
        assert_eq!(value["presence"], true);
    }

    #[test]
    fn test_format_status_json_missing_readings() {
        let opts = FormatOptions::default();
        let json = format_status_json("http://device", &DeviceSnapshot::default(), &opts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["temperature"].is_null());
        assert!(value["humidity"].is_null());
    }
}
