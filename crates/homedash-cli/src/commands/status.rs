//! Status command implementation.

use std::io::{self, Write};
use std::time::Duration;

use anyhow::{Context, Result};

use homedash_core::{ConnectionStatus, DeviceClient, Error, SaveState, ThresholdInput, render};

use crate::cli::OutputFormat;
use crate::format::{FormatOptions, format_status_json, format_status_text};

/// Poll the device once and print its state.
///
/// The poll uses the same deadline as the dashboard.
pub async fn cmd_status(
    client: &DeviceClient,
    format: OutputFormat,
    opts: &FormatOptions,
    deadline: Duration,
) -> Result<()> {
    let snapshot = tokio::time::timeout(deadline, client.status())
        .await
        .map_err(|_| Error::timeout("status", deadline))
        .and_then(|result| result)
        .with_context(|| format!("Failed to read status from {}", client.base_url()))?;

    let content = match format {
        OutputFormat::Json => format_status_json(client.base_url(), &snapshot, opts)?,
        OutputFormat::Text => {
            let view = render(
                Some(&snapshot),
                opts.unit,
                ConnectionStatus::Connected,
                &ThresholdInput::default(),
                SaveState::Idle,
                client.base_url(),
            );
            format_status_text(&view, opts)
        }
    };

    let mut stdout = io::stdout().lock();
    stdout.write_all(content.as_bytes())?;
    stdout.flush()?;
    Ok(())
}
