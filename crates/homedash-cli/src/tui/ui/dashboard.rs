//! Readings, controls and chart panels.

use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use homedash_core::{DashboardView, SwitchView};

use super::theme::{AppTheme, BORDER_TYPE};
use crate::tui::app::App;

fn panel<'a>(title: &'a str, theme: &AppTheme) -> Block<'a> {
    Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_type(BORDER_TYPE)
        .border_style(Style::default().fg(theme.border_inactive))
}

fn label(text: &str, theme: &AppTheme) -> Span<'static> {
    Span::styled(format!("{:<13}", text), Style::default().fg(theme.text_secondary))
}

/// Draw temperature, humidity and presence.
pub(super) fn draw_readings_panel(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let view = app.dashboard.view();
    let value = Style::default()
        .fg(theme.text_primary)
        .add_modifier(Modifier::BOLD);

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            label(" Temperature", theme),
            Span::styled(view.temperature.clone(), value),
            Span::raw(format!(" {}", view.unit_symbol)),
        ]),
        Line::from(vec![
            label(" Humidity", theme),
            Span::styled(view.humidity.clone(), value),
            Span::raw(" %"),
        ]),
        Line::from(vec![
            label(" Presence", theme),
            Span::styled(view.presence, theme.emphasis(view.presence_emphasis)),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(panel(" Readings ", theme)), area);
}

fn switch_line<'a>(name: &str, key: char, switch: &SwitchView, theme: &AppTheme) -> Line<'a> {
    let button = if switch.disabled {
        Style::default().fg(theme.text_muted)
    } else {
        Style::default().fg(theme.primary)
    };
    Line::from(vec![
        label(&format!(" {}", name), theme),
        Span::styled(format!("{:<5}", switch.label), theme.switch(switch.class)),
        Span::styled(format!("[{}] {}", key, switch.caption), button),
    ])
}

fn threshold_line<'a>(view: &DashboardView, theme: &AppTheme) -> Line<'a> {
    let field = if view.threshold_focused {
        Span::styled(
            format!("{}_", view.threshold),
            Style::default()
                .fg(theme.warning)
                .add_modifier(Modifier::UNDERLINED),
        )
    } else {
        Span::styled(view.threshold.clone(), Style::default().fg(theme.text_primary))
    };
    Line::from(vec![
        label(" Threshold", theme),
        field,
        Span::raw(format!(" {}  ", view.unit_symbol)),
        Span::styled(
            format!("[Enter] {}", view.save_caption),
            Style::default().fg(theme.primary),
        ),
    ])
}

/// Draw fan, light, mode, threshold and unit controls.
pub(super) fn draw_controls_panel(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let view = app.dashboard.view();
    let checkbox = if view.auto_checked { "[x]" } else { "[ ]" };

    let lines = vec![
        switch_line("Fan", 'f', &view.fan, theme),
        switch_line("Light", 'l', &view.light, theme),
        Line::from(vec![
            label(" Auto mode", theme),
            Span::styled(
                format!("{} ", checkbox),
                if view.auto_checked {
                    Style::default().fg(theme.success)
                } else {
                    Style::default().fg(theme.text_secondary)
                },
            ),
            Span::styled("[m] toggle", Style::default().fg(theme.primary)),
        ]),
        threshold_line(view, theme),
        Line::from(vec![
            label(" Unit", theme),
            Span::styled(
                format!("[u] {}", view.unit_switch_caption),
                Style::default().fg(theme.primary),
            ),
        ]),
    ];

    let block = if app.dashboard.is_editing_threshold() {
        panel(" Controls ", theme).border_style(Style::default().fg(theme.border_active))
    } else {
        panel(" Controls ", theme)
    };
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Draw the rolling temperature/humidity chart.
pub(super) fn draw_chart(frame: &mut Frame, area: Rect, app: &App, theme: &AppTheme) {
    let chart = app.dashboard.chart();
    let block = panel(" History ", theme);

    let Some((lo, hi)) = chart.bounds() else {
        let waiting = Paragraph::new(Line::from(Span::styled(
            " Waiting for readings...",
            Style::default().fg(theme.text_muted),
        )))
        .block(block);
        frame.render_widget(waiting, area);
        return;
    };

    let temperature = chart.temperature_series();
    let humidity = chart.humidity_series();
    let temperature_label = app.dashboard.temperature_label();
    let datasets = vec![
        Dataset::default()
            .name(temperature_label)
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.warning))
            .data(&temperature),
        Dataset::default()
            .name("Humidity (%)")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(theme.info))
            .data(&humidity),
    ];

    let labels = chart.labels();
    let x_max = (chart.len().saturating_sub(1)).max(1) as f64;
    let x_labels = vec![
        labels.first().map(|s| s.to_string()).unwrap_or_default(),
        labels.last().map(|s| s.to_string()).unwrap_or_default(),
    ];
    let (y_min, y_max) = ((lo - 2.0).floor(), (hi + 2.0).ceil());

    let widget = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.text_muted))
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.text_muted))
                .bounds([y_min, y_max])
                .labels(vec![format!("{:.0}", y_min), format!("{:.0}", y_max)]),
        );
    frame.render_widget(widget, area);
}
