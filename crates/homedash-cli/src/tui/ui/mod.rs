//! Main UI layout and rendering for the TUI dashboard.
//!
//! The layout consists of:
//!
//! - **Header**: Title, device URL and connection status
//! - **Main content**: Readings (left) and controls (right)
//! - **Chart**: Rolling temperature and humidity history
//! - **Status bar**: Key hints and status messages
//!
//! Everything drawn here comes from the dashboard's [`homedash_core::DashboardView`];
//! the UI never reads device state directly.

pub mod theme;

mod dashboard;
mod overlays;

use chrono::Local;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use super::app::App;
use theme::AppTheme;

/// Draw the complete TUI interface.
pub fn draw(frame: &mut Frame, app: &App) {
    let theme = AppTheme::dark();

    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Header bar
            Constraint::Length(10), // Readings + controls
            Constraint::Min(8),     // Chart
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    draw_header(frame, main_layout[0], app, &theme);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(main_layout[1]);
    dashboard::draw_readings_panel(frame, panels[0], app, &theme);
    dashboard::draw_controls_panel(frame, panels[1], app, &theme);
    dashboard::draw_chart(frame, main_layout[2], app, &theme);

    draw_status_bar(frame, main_layout[3], app, &theme);

    if app.show_help {
        overlays::draw_help_overlay(frame, app, &theme);
    }

    // Blocking alert (on top of everything)
    overlays::draw_alert(frame, app, &theme);
}

/// Draw the header bar with title, device URL and connection status.
fn draw_header(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let view = app.dashboard.view();
    let status = app.dashboard.status();

    let mut spans = vec![
        Span::styled(
            " Home Dashboard ",
            Style::default()
                .fg(theme.primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("{} ", view.device_url),
            Style::default().fg(theme.text_muted),
        ),
        Span::styled(
            format!(" {} ", view.status_label),
            Style::default()
                .fg(theme.status_color(status))
                .add_modifier(Modifier::BOLD),
        ),
    ];

    if let Some(at) = app.dashboard.last_update() {
        spans.push(Span::styled(
            format!(" updated {} ", at.format("%H:%M:%S")),
            Style::default().fg(theme.text_secondary),
        ));
    }

    let clock = Local::now().format("%H:%M:%S").to_string();
    let used: usize = spans.iter().map(|s| s.width()).sum();
    let padding = (area.width as usize).saturating_sub(used + clock.len() + 1);
    spans.push(Span::raw(" ".repeat(padding)));
    spans.push(Span::styled(clock, Style::default().fg(theme.text_muted)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the status bar with key hints or the latest status message.
fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let line = if app.dashboard.is_editing_threshold() {
        Line::from(Span::styled(
            " Editing threshold: Enter save | Esc cancel | Backspace delete",
            Style::default().fg(theme.warning),
        ))
    } else if let Some(message) = app.dashboard.current_status_message() {
        Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(theme.info),
        ))
    } else {
        Line::from(Span::styled(
            " q quit | f fan | l light | m mode | u unit | t threshold | r refresh | ? help",
            Style::default().fg(theme.text_muted),
        ))
    };
    frame.render_widget(Paragraph::new(line), area);
}
