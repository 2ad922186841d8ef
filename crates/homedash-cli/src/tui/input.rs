//! Keyboard input handling for the TUI.
//!
//! Keys are first mapped to an [`Action`] by [`handle_key`], which only looks
//! at the current input mode. [`apply_action`] then applies the action to the
//! application state and returns the command, if any, for the worker.
//!
//! # Key Bindings
//!
//! | Key       | Action                 |
//! |-----------|------------------------|
//! | `q`       | Quit                   |
//! | `f`       | Toggle fan             |
//! | `l`       | Toggle light           |
//! | `m`       | Toggle auto/manual     |
//! | `u`       | Toggle °C/°F           |
//! | `r`       | Refresh now            |
//! | `t`/Enter | Edit threshold         |
//! | `?`       | Toggle help            |
//!
//! While editing the threshold: digits, `.` and `-` type, Backspace deletes,
//! Enter saves and Esc cancels. While an alert is showing, any key dismisses
//! it and does nothing else.

use crossterm::event::KeyCode;

use homedash_core::Command;

use super::app::App;

/// User actions that can be triggered by keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    ToggleFan,
    ToggleLight,
    ToggleMode,
    ToggleUnit,
    /// Poll the device now.
    Refresh,
    /// Focus the threshold field.
    EditThreshold,
    /// Input character for the threshold field.
    TextInput(char),
    TextBackspace,
    /// Save the threshold.
    TextSubmit,
    /// Leave the threshold field without saving.
    TextCancel,
    ToggleHelp,
    DismissAlert,
    /// No action (unrecognized key).
    None,
}

/// Current input mode, as far as key mapping is concerned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputMode {
    pub alert_showing: bool,
    pub editing_threshold: bool,
    pub help_showing: bool,
}

impl InputMode {
    pub fn of(app: &App) -> Self {
        Self {
            alert_showing: app.dashboard.alert().is_some(),
            editing_threshold: app.dashboard.is_editing_threshold(),
            help_showing: app.show_help,
        }
    }
}

/// Map a key code to an action.
pub fn handle_key(key: KeyCode, mode: InputMode) -> Action {
    if mode.alert_showing {
        return Action::DismissAlert;
    }

    if mode.editing_threshold {
        return match key {
            KeyCode::Char(c) => Action::TextInput(c),
            KeyCode::Backspace => Action::TextBackspace,
            KeyCode::Enter => Action::TextSubmit,
            KeyCode::Esc => Action::TextCancel,
            _ => Action::None,
        };
    }

    if mode.help_showing {
        return match key {
            KeyCode::Char('?') | KeyCode::Esc => Action::ToggleHelp,
            KeyCode::Char('q') => Action::Quit,
            _ => Action::None,
        };
    }

    match key {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Char('f') => Action::ToggleFan,
        KeyCode::Char('l') => Action::ToggleLight,
        KeyCode::Char('m') => Action::ToggleMode,
        KeyCode::Char('u') => Action::ToggleUnit,
        KeyCode::Char('r') => Action::Refresh,
        KeyCode::Char('t') | KeyCode::Enter => Action::EditThreshold,
        KeyCode::Char('?') => Action::ToggleHelp,
        _ => Action::None,
    }
}

/// Apply an action to the application state.
///
/// Returns a command for the worker when the action needs the device.
pub fn apply_action(app: &mut App, action: Action) -> Option<Command> {
    let dashboard = &mut app.dashboard;
    match action {
        Action::Quit => {
            app.should_quit = true;
            None
        }
        Action::ToggleFan => dashboard.toggle_fan(),
        Action::ToggleLight => dashboard.toggle_light(),
        Action::ToggleMode => dashboard.toggle_mode(),
        Action::ToggleUnit => {
            dashboard.toggle_unit();
            None
        }
        Action::Refresh => {
            dashboard.push_status_message("Refreshing...".to_string());
            Some(Command::Poll)
        }
        Action::EditThreshold => {
            dashboard.focus_threshold();
            None
        }
        Action::TextInput(c) => {
            dashboard.threshold_input_char(c);
            None
        }
        Action::TextBackspace => {
            dashboard.threshold_backspace();
            None
        }
        Action::TextSubmit => dashboard.update_threshold(),
        Action::TextCancel => {
            dashboard.blur_threshold();
            None
        }
        Action::ToggleHelp => {
            app.toggle_help();
            None
        }
        Action::DismissAlert => {
            dashboard.dismiss_alert();
            None
        }
        Action::None => None,
    }
}
