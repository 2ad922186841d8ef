use std::io;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use tracing::debug;

use homedash_cli::cli::{Cli, Commands, UnitArgs};
use homedash_cli::commands::{DeviceSetting, cmd_config, cmd_set, cmd_status};
use homedash_cli::config::{Config, resolve_url};
use homedash_cli::format::FormatOptions;
use homedash_cli::logging;
use homedash_core::{DeviceClient, DisplayUnit};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.clone().unwrap_or(Commands::Dashboard {
        units: UnitArgs::default(),
    });

    // Handle completions command early (before tracing init)
    if let Commands::Completions { shell } = command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "homedash", &mut io::stdout());
        return Ok(());
    }

    if matches!(command, Commands::Dashboard { .. }) {
        let path = logging::init_file(&homedash_cli::config::data_dir(), cli.verbose, cli.quiet)?;
        debug!("Logging to {}", path.display());
    } else {
        logging::init_stderr(cli.verbose, cli.quiet);
    }

    let config = Config::load();
    let url = resolve_url(cli.url.as_deref(), &config);
    debug!(url = %url, "Resolved device URL");

    let client = || DeviceClient::new(&url).context("Invalid device URL");

    match command {
        Commands::Dashboard { units } => {
            run_dashboard(client()?, &config, units.resolve(config.unit())).await
        }
        Commands::Status { format, units } => {
            let opts = FormatOptions::new(false, units.resolve(config.unit()));
            cmd_status(&client()?, format, &opts, config.worker_config().poll_timeout).await
        }
        Commands::Fan { state } => {
            cmd_set(&client()?, DeviceSetting::Fan(state.into()), cli.quiet).await
        }
        Commands::Light { state } => {
            cmd_set(&client()?, DeviceSetting::Light(state.into()), cli.quiet).await
        }
        Commands::Mode { mode } => {
            cmd_set(&client()?, DeviceSetting::Mode(mode.into()), cli.quiet).await
        }
        Commands::Threshold { value, fahrenheit } => {
            let unit = if fahrenheit {
                DisplayUnit::Fahrenheit
            } else {
                DisplayUnit::Celsius
            };
            cmd_set(&client()?, DeviceSetting::Threshold { value, unit }, cli.quiet).await
        }
        Commands::Config { action } => cmd_config(action),
        Commands::Completions { .. } => {
            // Already handled above
            unreachable!()
        }
    }
}

#[cfg(feature = "tui")]
async fn run_dashboard(client: DeviceClient, config: &Config, unit: DisplayUnit) -> Result<()> {
    homedash_cli::tui::run(client, config, unit).await
}

#[cfg(not(feature = "tui"))]
async fn run_dashboard(_client: DeviceClient, _config: &Config, _unit: DisplayUnit) -> Result<()> {
    anyhow::bail!("This build has no dashboard; rebuild with the `tui` feature")
}
