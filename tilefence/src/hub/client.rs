//! HTTP client for the hub's command API.

use std::collections::HashMap;
use std::time::Duration;

use tracing::{debug, info};

use crate::config::HubSettings;

use super::device::{build_inventory, Device, DeviceRecord};
use super::error::HubError;

/// Default HTTP timeout for hub requests; the hub is on the local
/// network, so anything slower than this is effectively down.
const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for the hub's REST command API.
///
/// All endpoints live under `{base_url}/apps/api/{app_id}/` and
/// authenticate with an access token passed as a query parameter.
pub struct HubClient {
    http: reqwest::Client,
    api_base: String,
    access_token: String,
}

impl HubClient {
    /// Create a client from hub connection settings.
    pub fn new(settings: &HubSettings) -> Result<Self, HubError> {
        let http = reqwest::Client::builder()
            .timeout(DEFAULT_HTTP_TIMEOUT)
            .build()
            .map_err(|e| HubError::HttpError(format!("Failed to create HTTP client: {}", e)))?;

        let api_base = format!(
            "{}/apps/api/{}",
            settings.base_url.trim_end_matches('/'),
            settings.app_id
        );
        info!(api = %api_base, "Connecting to hub command API");

        Ok(Self {
            http,
            api_base,
            access_token: settings.access_token.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}?access_token={}",
            self.api_base, path, self.access_token
        )
    }

    /// Fetch the hub's virtual presence device inventory.
    pub async fn fetch_devices(&self) -> Result<HashMap<u32, Device>, HubError> {
        let url = self.endpoint("devices/all");
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HubError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::HttpError(format!(
                "HTTP {} from hub device list",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| HubError::HttpError(e.to_string()))?;

        let records: Vec<DeviceRecord> =
            serde_json::from_slice(&bytes).map_err(|e| HubError::JsonError(e.to_string()))?;

        let inventory = build_inventory(records)?;
        for device in inventory.values() {
            info!(device = %device.display_name(), "Found hub virtual presence device");
        }

        Ok(inventory)
    }

    /// Send an arrived/departed command to one device.
    pub async fn send_presence(&self, device_id: u32, arrived: bool) -> Result<(), HubError> {
        let command = presence_command(arrived);
        let url = self.endpoint(&format!("devices/{}/{}", device_id, command));

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| HubError::HttpError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(HubError::HttpError(format!(
                "HTTP {} sending '{}' to device {}",
                status, command, device_id
            )));
        }

        debug!(device_id, command, "Hub command accepted");
        Ok(())
    }
}

/// Map a presence decision to the hub's command verb.
pub fn presence_command(arrived: bool) -> &'static str {
    if arrived {
        "arrived"
    } else {
        "departed"
    }
}
