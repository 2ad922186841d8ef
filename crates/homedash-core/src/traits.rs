//! Trait abstraction over the device API.
//!
//! [`DeviceApi`] is implemented by the HTTP [`crate::DeviceClient`] and by
//! [`crate::MockDevice`], so the worker and anything else generic over it can
//! be exercised without a real device.

use async_trait::async_trait;

use homedash_types::{DeviceSnapshot, Mode, SwitchState};

use crate::error::Result;
use crate::messages::Command;

/// Operations exposed by the home-automation device.
///
/// # Example
///
/// ```ignore
/// use homedash_core::{DeviceApi, Result};
///
/// async fn print_temp<D: DeviceApi>(device: &D) -> Result<()> {
///     let snapshot = device.status().await?;
///     println!("{:?}", snapshot.temp);
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait DeviceApi: Send + Sync {
    /// Base URL (or other identifier) of the device.
    fn base_url(&self) -> &str;

    /// Fetch the full device state.
    async fn status(&self) -> Result<DeviceSnapshot>;

    /// Switch the fan.
    async fn set_fan(&self, state: SwitchState) -> Result<()>;

    /// Switch the light.
    async fn set_light(&self, state: SwitchState) -> Result<()>;

    /// Change the operating mode.
    async fn set_mode(&self, mode: Mode) -> Result<()>;

    /// Save the automation threshold, in °C.
    async fn set_target_temp(&self, celsius: f64) -> Result<()>;

    /// Send an actuation command.
    ///
    /// `Poll` and `Shutdown` are not device commands and are accepted as
    /// no-ops.
    async fn send(&self, command: &Command) -> Result<()> {
        match *command {
            Command::SetFan { state } => self.set_fan(state).await,
            Command::SetLight { state } => self.set_light(state).await,
            Command::SetMode { mode } => self.set_mode(mode).await,
            Command::SetThreshold { celsius } => self.set_target_temp(celsius).await,
            Command::Poll | Command::Shutdown => Ok(()),
        }
    }
}
