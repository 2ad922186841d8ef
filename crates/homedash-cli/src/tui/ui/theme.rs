//! Color palette and style helpers for the dashboard.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

use homedash_core::{ConnectionStatus, Emphasis};

/// Border style used by every panel.
pub const BORDER_TYPE: BorderType = BorderType::Rounded;

/// Application colors, Tailwind-inspired.
#[derive(Debug, Clone, Copy)]
pub struct AppTheme {
    pub primary: Color,

    pub success: Color,
    pub warning: Color,
    pub danger: Color,
    pub info: Color,

    pub text_primary: Color,
    pub text_secondary: Color,
    pub text_muted: Color,

    pub border_active: Color,
    pub border_inactive: Color,
}

impl Default for AppTheme {
    fn default() -> Self {
        Self::dark()
    }
}

impl AppTheme {
    #[must_use]
    pub const fn dark() -> Self {
        Self {
            primary: Color::Rgb(34, 211, 238), // cyan-400

            success: Color::Rgb(74, 222, 128), // green-400
            warning: Color::Rgb(251, 191, 36), // amber-400
            danger: Color::Rgb(248, 113, 113), // red-400
            info: Color::Rgb(96, 165, 250),    // blue-400

            text_primary: Color::Rgb(248, 250, 252),   // slate-50
            text_secondary: Color::Rgb(148, 163, 184), // slate-400
            text_muted: Color::Rgb(100, 116, 139),     // slate-500

            border_active: Color::Rgb(34, 211, 238), // cyan-400
            border_inactive: Color::Rgb(71, 85, 105), // slate-600
        }
    }

    /// Color of the connection indicator.
    #[must_use]
    pub fn status_color(&self, status: ConnectionStatus) -> Color {
        match status {
            ConnectionStatus::Connected => self.success,
            ConnectionStatus::Timeout => self.warning,
            ConnectionStatus::Disconnected => self.danger,
        }
    }

    /// Style for the presence label.
    #[must_use]
    pub fn emphasis(&self, emphasis: Emphasis) -> Style {
        match emphasis {
            Emphasis::Positive => Style::default()
                .fg(self.success)
                .add_modifier(Modifier::BOLD),
            Emphasis::Muted => Style::default().fg(self.text_muted),
        }
    }

    /// Style for an `on`/`off` switch class.
    #[must_use]
    pub fn switch(&self, class: &str) -> Style {
        if class == "on" {
            Style::default()
                .fg(self.success)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(self.text_secondary)
        }
    }
}
