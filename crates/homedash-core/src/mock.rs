//! Mock device implementation for testing.
//!
//! [`MockDevice`] implements [`DeviceApi`] in memory. Accepted commands mutate
//! its state the way the real device does, so a follow-up status poll sees
//! the change.
//!
//! # Features
//!
//! - **Failure injection**: make polls or commands fail, or answer with an HTTP status
//! - **Latency simulation**: delay responses to exercise deadlines and races
//! - **Call recording**: inspect the commands that reached the device

use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::RwLock;

use homedash_types::{DeviceSnapshot, Mode, SwitchState};

use crate::error::{Error, Result};
use crate::messages::Command;
use crate::traits::DeviceApi;

/// A mock device for testing.
///
/// # Example
///
/// ```
/// use homedash_core::{DeviceApi, MockDevice};
///
/// #[tokio::main]
/// async fn main() {
///     let device = MockDevice::new();
///     let snapshot = device.status().await.unwrap();
///     assert_eq!(snapshot.temp, Some(21.0));
/// }
/// ```
pub struct MockDevice {
    snapshot: RwLock<DeviceSnapshot>,
    sent: RwLock<Vec<Command>>,
    status_count: AtomicU32,
    fail_status: AtomicBool,
    /// HTTP status to answer commands with (0 = accept).
    command_status: AtomicU32,
    /// Simulated status latency in milliseconds (0 = no delay).
    status_latency_ms: AtomicU64,
    /// Simulated command latency in milliseconds (0 = no delay).
    command_latency_ms: AtomicU64,
}

impl std::fmt::Debug for MockDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockDevice")
            .field("status_count", &self.status_count.load(Ordering::Relaxed))
            .field("fail_status", &self.fail_status.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for MockDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDevice {
    /// Create a mock device with the default snapshot.
    pub fn new() -> Self {
        Self::with_snapshot(Self::default_snapshot())
    }

    /// Create a mock device reporting `snapshot`.
    pub fn with_snapshot(snapshot: DeviceSnapshot) -> Self {
        Self {
            snapshot: RwLock::new(snapshot),
            sent: RwLock::new(Vec::new()),
            status_count: AtomicU32::new(0),
            fail_status: AtomicBool::new(false),
            command_status: AtomicU32::new(0),
            status_latency_ms: AtomicU64::new(0),
            command_latency_ms: AtomicU64::new(0),
        }
    }

    fn default_snapshot() -> DeviceSnapshot {
        DeviceSnapshot {
            temp: Some(21.0),
            humidity: Some(40.0),
            presence: false,
            fan: false,
            light: true,
            mode: Mode::Manual,
            target_temp: Some(22.0),
        }
    }

    /// Replace the reported snapshot.
    pub async fn set_snapshot(&self, snapshot: DeviceSnapshot) {
        *self.snapshot.write().await = snapshot;
    }

    /// Current reported snapshot.
    pub async fn snapshot(&self) -> DeviceSnapshot {
        self.snapshot.read().await.clone()
    }

    /// Make status polls fail with a connection error.
    pub fn set_fail_status(&self, fail: bool) {
        self.fail_status.store(fail, Ordering::Relaxed);
    }

    /// Answer commands with `status` (e.g. 500). Pass `None` to accept them.
    pub fn set_command_status(&self, status: Option<u16>) {
        self.command_status
            .store(status.map(u32::from).unwrap_or(0), Ordering::Relaxed);
    }

    /// Delay every status response.
    pub fn set_status_latency(&self, latency: Duration) {
        self.status_latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Delay every command response.
    pub fn set_command_latency(&self, latency: Duration) {
        self.command_latency_ms
            .store(latency.as_millis() as u64, Ordering::Relaxed);
    }

    /// Number of status requests received.
    pub fn status_count(&self) -> u32 {
        self.status_count.load(Ordering::Relaxed)
    }

    /// Commands received so far, accepted or not.
    pub async fn sent_commands(&self) -> Vec<Command> {
        self.sent.read().await.clone()
    }

    async fn delay(latency_ms: &AtomicU64) {
        let ms = latency_ms.load(Ordering::Relaxed);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }

    async fn accept(&self, command: Command) -> Result<()> {
        self.sent.write().await.push(command.clone());
        Self::delay(&self.command_latency_ms).await;

        let status = self.command_status.load(Ordering::Relaxed);
        if status != 0 {
            return Err(Error::Api {
                status: status as u16,
                message: "Mock failure".to_string(),
            });
        }

        let mut snapshot = self.snapshot.write().await;
        match command {
            Command::SetFan { state } => snapshot.fan = state.is_on(),
            Command::SetLight { state } => snapshot.light = state.is_on(),
            Command::SetMode { mode } => snapshot.mode = mode,
            Command::SetThreshold { celsius } => snapshot.target_temp = Some(celsius),
            Command::Poll | Command::Shutdown => {}
        }
        Ok(())
    }
}

#[async_trait]
impl DeviceApi for MockDevice {
    fn base_url(&self) -> &str {
        "mock://device"
    }

    async fn status(&self) -> Result<DeviceSnapshot> {
        self.status_count.fetch_add(1, Ordering::Relaxed);
        // State is captured when the request arrives, not when it is answered.
        let snapshot = self.snapshot.read().await.clone();
        Self::delay(&self.status_latency_ms).await;

        if self.fail_status.load(Ordering::Relaxed) {
            return Err(Error::ConnectionFailed("Mock failure".to_string()));
        }
        Ok(snapshot)
    }

    async fn set_fan(&self, state: SwitchState) -> Result<()> {
        self.accept(Command::SetFan { state }).await
    }

    async fn set_light(&self, state: SwitchState) -> Result<()> {
        self.accept(Command::SetLight { state }).await
    }

    async fn set_mode(&self, mode: Mode) -> Result<()> {
        self.accept(Command::SetMode { mode }).await
    }

    async fn set_target_temp(&self, celsius: f64) -> Result<()> {
        self.accept(Command::SetThreshold { celsius }).await
    }
}
