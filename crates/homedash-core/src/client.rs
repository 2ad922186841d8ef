//! HTTP client for the device's REST API.
//!
//! # Example
//!
//! ```no_run
//! use homedash_core::DeviceClient;
//! use homedash_types::SwitchState;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = DeviceClient::new("http://192.168.0.114:5000")?;
//!
//! let snapshot = client.status().await?;
//! println!("Temperature: {:?}", snapshot.temp);
//!
//! client.set_fan(SwitchState::On).await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use homedash_types::{
    ConfigRequest, DeviceSnapshot, Mode, ModeRequest, SwitchRequest, SwitchState,
};

use crate::error::{Error, Result};
use crate::messages::RequestKind;
use crate::traits::DeviceApi;

/// Transport-level timeout applied to every request.
///
/// Status polls carry their own, shorter deadline in the worker.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the device API.
#[derive(Debug, Clone)]
pub struct DeviceClient {
    client: Client,
    base_url: String,
}

impl DeviceClient {
    /// Create a new device client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - The base URL of the device (e.g., "http://192.168.0.114:5000")
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(DEFAULT_REQUEST_TIMEOUT)
            .build()
            .map_err(Error::Request)?;

        Self::with_client(base_url, client)
    }

    /// Create a client with a custom reqwest Client.
    pub fn with_client(base_url: &str, client: Client) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the current device state.
    pub async fn status(&self) -> Result<DeviceSnapshot> {
        let url = self.url(RequestKind::Status);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        let response = check_status(response).await?;
        let snapshot = response.json::<DeviceSnapshot>().await?;
        debug!(?snapshot, "Fetched device status");
        Ok(snapshot)
    }

    /// Switch the fan on or off.
    pub async fn set_fan(&self, state: SwitchState) -> Result<()> {
        self.post_json(RequestKind::Fan, &SwitchRequest { state }).await
    }

    /// Switch the light on or off.
    pub async fn set_light(&self, state: SwitchState) -> Result<()> {
        self.post_json(RequestKind::Light, &SwitchRequest { state }).await
    }

    /// Change the operating mode.
    pub async fn set_mode(&self, mode: Mode) -> Result<()> {
        self.post_json(RequestKind::Mode, &ModeRequest { mode }).await
    }

    /// Save the automation threshold. `celsius` must already be in °C.
    pub async fn set_target_temp(&self, celsius: f64) -> Result<()> {
        self.post_json(
            RequestKind::Threshold,
            &ConfigRequest {
                target_temp: celsius,
            },
        )
        .await
    }

    // ======================================================================
    // Internal HTTP helpers
    // ======================================================================

    fn url(&self, kind: RequestKind) -> String {
        format!("{}{}", self.base_url, kind.path())
    }

    async fn post_json<B: Serialize>(&self, kind: RequestKind, body: &B) -> Result<()> {
        let url = self.url(kind);
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| Error::NotReachable {
                url: url.clone(),
                source: e,
            })?;

        check_status(response).await?;
        debug!(url = %url, "Command accepted");
        Ok(())
    }
}

#[async_trait]
impl DeviceApi for DeviceClient {
    fn base_url(&self) -> &str {
        DeviceClient::base_url(self)
    }

    async fn status(&self) -> Result<DeviceSnapshot> {
        DeviceClient::status(self).await
    }

    async fn set_fan(&self, state: SwitchState) -> Result<()> {
        DeviceClient::set_fan(self, state).await
    }

    async fn set_light(&self, state: SwitchState) -> Result<()> {
        DeviceClient::set_light(self, state).await
    }

    async fn set_mode(&self, mode: Mode) -> Result<()> {
        DeviceClient::set_mode(self, mode).await
    }

    async fn set_target_temp(&self, celsius: f64) -> Result<()> {
        DeviceClient::set_target_temp(self, celsius).await
    }
}

/// Trim the trailing slash and require an http(s) scheme.
fn normalize_base_url(base_url: &str) -> Result<String> {
    let base_url = base_url.trim().trim_end_matches('/').to_string();

    if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        return Err(Error::InvalidUrl(format!(
            "URL must start with http:// or https://, got: {}",
            base_url
        )));
    }

    Ok(base_url)
}

/// Turn any non-2xx response into [`Error::Api`], using the device's
/// `{"error": "..."}` body when present.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
        .unwrap_or_else(|| status.to_string());

    Err(Error::Api {
        status: status.as_u16(),
        message,
    })
}
