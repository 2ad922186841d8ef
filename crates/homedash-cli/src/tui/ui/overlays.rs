//! Overlays drawn on top of the dashboard: help and the blocking alert.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::App;

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width.saturating_sub(2));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn shortcut_line<'a>(key: &'a str, description: &'a str, theme: &AppTheme) -> Line<'a> {
    Line::from(vec![
        Span::styled(
            format!("{:>12}  ", key),
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(description, Style::default().fg(theme.text_primary)),
    ])
}

/// Draw the keyboard shortcut overlay, with the most recent error if any.
pub(super) fn draw_help_overlay(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let help_area = centered(frame.area(), 50, 18);
    frame.render_widget(Clear, help_area);

    let mut lines = vec![
        Line::from(""),
        shortcut_line("f", "Turn fan on/off", theme),
        shortcut_line("l", "Turn light on/off", theme),
        shortcut_line("m", "Switch auto/manual mode", theme),
        shortcut_line("u", "Switch °C/°F", theme),
        shortcut_line("r", "Refresh now", theme),
        shortcut_line("t / Enter", "Edit threshold", theme),
        Line::from(""),
        Line::from(Span::styled(
            "  While editing the threshold",
            Style::default().fg(theme.text_secondary),
        )),
        shortcut_line("Enter", "Save", theme),
        shortcut_line("Esc", "Cancel", theme),
        Line::from(""),
        shortcut_line("?", "Close help", theme),
        shortcut_line("q", "Quit", theme),
    ];

    if let Some(error) = app.dashboard.last_error() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("  Last error: {}", error.chars().take(34).collect::<String>()),
            Style::default().fg(theme.danger),
        )));
    }

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(theme.border_active));
    frame.render_widget(Paragraph::new(lines).block(block), help_area);
}

/// Draw the blocking alert, if one is showing.
pub(super) fn draw_alert(frame: &mut Frame, app: &App, theme: &AppTheme) {
    let Some(message) = app.dashboard.alert() else {
        return;
    };

    let alert_area = centered(frame.area(), 44, 7);
    frame.render_widget(Clear, alert_area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message,
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to continue",
            Style::default().fg(theme.text_muted),
        )),
    ];

    let block = Block::default()
        .title(" Alert ")
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(theme.danger));
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, alert_area);
}
