//! Device control commands: fan, light, mode and threshold.

use anyhow::{Context, Result};
use tracing::info;

use homedash_core::{DeviceClient, DisplayUnit, Mode, SwitchState, parse_threshold};

/// A change to apply to the device.
#[derive(Debug, Clone, PartialEq)]
pub enum DeviceSetting {
    Fan(SwitchState),
    Light(SwitchState),
    Mode(Mode),
    /// Threshold text in `unit`; sent in °C.
    Threshold { value: String, unit: DisplayUnit },
}

impl DeviceSetting {
    fn describe(&self) -> String {
        match self {
            DeviceSetting::Fan(state) => format!("Fan turned {}", state),
            DeviceSetting::Light(state) => format!("Light turned {}", state),
            DeviceSetting::Mode(mode) => format!("Mode set to {}", mode),
            DeviceSetting::Threshold { value, unit } => {
                format!("Threshold set to {} {}", value.trim(), unit.symbol())
            }
        }
    }
}

pub async fn cmd_set(client: &DeviceClient, setting: DeviceSetting, quiet: bool) -> Result<()> {
    let url = client.base_url().to_string();
    let context = || format!("Failed to reach device at {}", url);

    match &setting {
        DeviceSetting::Fan(state) => client.set_fan(*state).await.with_context(context)?,
        DeviceSetting::Light(state) => client.set_light(*state).await.with_context(context)?,
        DeviceSetting::Mode(mode) => client.set_mode(*mode).await.with_context(context)?,
        DeviceSetting::Threshold { value, unit } => {
            let celsius = parse_threshold(value, *unit)?;
            info!(celsius, "Sending threshold");
            client.set_target_temp(celsius).await.with_context(context)?
        }
    }

    if !quiet {
        println!("{}", setting.describe());
    }
    Ok(())
}
