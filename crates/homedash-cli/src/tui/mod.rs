//! Terminal dashboard.
//!
//! This module ties the [`Dashboard`] state store to a terminal front-end:
//!
//! - Terminal setup and restoration
//! - Channel creation for worker communication
//! - The main event loop with input handling and rendering
//! - Graceful shutdown of the device worker

pub mod app;
pub mod input;
pub mod ui;

pub use app::App;

use std::io::{self, stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyEventKind},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{info, warn};

use homedash_core::{
    Command, Dashboard, DashboardOptions, DeviceClient, DeviceEvent, DeviceWorker, DisplayUnit,
};

use crate::config::Config;

/// How long to wait for terminal input before redrawing.
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Set up the terminal for TUI rendering.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout());
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to its original state.
pub fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

/// Run the dashboard against `client` until the user quits.
///
/// The device worker polls on the cadence from `config` and performs
/// every command the UI issues. On exit the worker is shut down and
/// awaited before returning.
pub async fn run(client: DeviceClient, config: &Config, unit: DisplayUnit) -> Result<()> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<Command>(32);
    let (event_tx, event_rx) = mpsc::channel::<DeviceEvent>(32);

    let base_url = client.base_url().to_string();
    info!(url = %base_url, "Starting dashboard");

    let worker = DeviceWorker::new(Arc::new(client), cmd_rx, event_tx, config.worker_config());
    let worker_handle = tokio::spawn(worker.run());

    let dashboard = Dashboard::new(DashboardOptions {
        unit,
        chart_capacity: config.chart_capacity,
        base_url,
    });
    let mut app = App::new(dashboard, event_rx);

    let mut terminal = setup_terminal()?;
    let result = run_event_loop(&mut terminal, &mut app, &cmd_tx).await;

    let _ = cmd_tx.try_send(Command::Shutdown);
    restore_terminal()?;

    if let Err(e) = worker_handle.await {
        warn!("Device worker ended abnormally: {}", e);
    }
    info!("Dashboard closed");

    result
}

/// Main event loop for the TUI.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    command_tx: &mpsc::Sender<Command>,
) -> Result<()> {
    while !app.should_quit() {
        app.dashboard.clean_expired_messages();

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(INPUT_POLL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            let action = input::handle_key(key.code, input::InputMode::of(app));
            if let Some(cmd) = input::apply_action(app, action) {
                send(command_tx, cmd);
            }
        }

        for cmd in app.drain_events() {
            send(command_tx, cmd);
        }

        // Let the worker make progress between redraws.
        tokio::task::yield_now().await;
    }

    Ok(())
}

fn send(command_tx: &mpsc::Sender<Command>, cmd: Command) {
    if let Err(e) = command_tx.try_send(cmd) {
        warn!("Dropped command for device worker: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use ratatui::backend::TestBackend;

    use homedash_core::{DeviceSnapshot, Mode, PollFailure};

    #[test]
    fn test_terminal_functions_exist() {
        // Actual terminal tests require a real terminal
        let _ = restore_terminal;
        let _ = setup_terminal;
    }

    #[test]
    fn test_input_handling_quit() {
        let action = input::handle_key(KeyCode::Char('q'), input::InputMode::default());
        assert_eq!(action, input::Action::Quit);
    }

    fn app() -> (App, mpsc::Sender<DeviceEvent>) {
        let (tx, rx) = mpsc::channel(8);
        let dashboard = Dashboard::new(DashboardOptions {
            base_url: "http://192.168.4.1".to_string(),
            ..DashboardOptions::default()
        });
        (App::new(dashboard, rx), tx)
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_draw_placeholder_dashboard() {
        let (app, _tx) = app();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("http://192.168.4.1"));
        assert!(text.contains("Temperature"));
        assert!(text.contains("--"));
        assert!(text.contains("Waiting for readings"));
    }

    #[test]
    fn test_draw_after_status() {
        let (mut app, tx) = app();
        tx.try_send(DeviceEvent::StatusFetched {
            snapshot: DeviceSnapshot {
                temp: Some(22.5),
                humidity: Some(41.0),
                presence: true,
                fan: true,
                light: false,
                mode: Mode::Auto,
                target_temp: Some(24.0),
            },
            received_at: chrono::Local::now(),
        })
        .unwrap();
        assert!(app.drain_events().is_empty());

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw(f, &app)).unwrap();

        let text = buffer_text(&terminal);
        assert!(text.contains("22.5"));
        assert!(text.contains("41.0"));
        assert!(text.contains("[x]"));
        assert!(text.contains("History"));
    }

    #[test]
    fn test_help_shows_last_error() {
        let (mut app, tx) = app();
        tx.try_send(DeviceEvent::PollFailed {
            failure: PollFailure::Disconnected,
            error: "connection refused".to_string(),
        })
        .unwrap();
        app.drain_events();
        app.toggle_help();

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Last error: connection refused"));
    }

    #[test]
    fn test_draw_help_and_alert() {
        let (mut app, _tx) = app();
        app.toggle_help();
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| ui::draw(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Close help"));

        app.toggle_help();
        input::apply_action(&mut app, input::Action::EditThreshold);
        input::apply_action(&mut app, input::Action::TextSubmit);
        terminal.draw(|f| ui::draw(f, &app)).unwrap();
        assert!(buffer_text(&terminal).contains("Press any key"));
    }
}
