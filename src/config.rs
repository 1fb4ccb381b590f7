//! Constants and credentials loading.
//!
//! Credentials live in a small JSON file (default `azurermconfig.json`):
//! ```json
//! { "tenantId": "...", "appId": "...", "appSecret": "...",
//!   "subscriptionId": "...", "location": "westus" }
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use std::path::Path;

/// Pause between provisioning calls, in milliseconds.
pub const SLEEP_MSEC: u64 = 200;

pub const DEFAULT_CONFIG_FILE: &str = "azurermconfig.json";

pub const AZURE_RM_ENDPOINT: &str = "https://management.azure.com";
pub const AZURE_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
/// OAuth2 resource the access token is issued for.
pub const AZURE_RESOURCE: &str = "https://management.core.windows.net/";

// ARM api-version per resource provider
pub const RESOURCE_API: &str = "2016-09-01";
pub const NETWORK_API: &str = "2016-09-01";
pub const STORAGE_API: &str = "2016-01-01";
pub const COMPUTE_API: &str = "2016-03-30";
pub const INSIGHTS_API: &str = "2015-04-01";

/// HTTP status codes the workflow expects back from ARM.
pub mod status {
    pub const CREATED: u16 = 201;
    pub const ACCEPTED: u16 = 202;
    pub const OK: u16 = 200;
}

/// Service principal credentials and target subscription.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureConfig {
    pub tenant_id: String,
    pub app_id: String,
    pub app_secret: String,
    pub subscription_id: String,
    pub location: String,
}

impl fmt::Debug for AzureConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AzureConfig")
            .field("tenant_id", &self.tenant_id)
            .field("app_id", &self.app_id)
            .field("app_secret", &"<redacted>")
            .field("subscription_id", &self.subscription_id)
            .field("location", &self.location)
            .finish()
    }
}

/// Email for autoscale notifications: `AZURERM_NOTIFY` if set and not blank.
pub fn notify_email() -> Option<String> {
    std::env::var("AZURERM_NOTIFY")
        .ok()
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
}

/// Config file path: `AZURERM_CONFIG` if set, else [`DEFAULT_CONFIG_FILE`].
pub fn config_path() -> String {
    std::env::var("AZURERM_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string())
}

/// ARM endpoint: `AZURE_RM_ENDPOINT` if set, else the public cloud endpoint.
pub fn rm_endpoint() -> String {
    std::env::var("AZURE_RM_ENDPOINT")
        .map(|e| e.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| AZURE_RM_ENDPOINT.to_string())
}

/// Load [`AzureConfig`] from a JSON file.
///
/// # Returns
/// * `Ok(AzureConfig)` - Parsed credentials
/// * `Err` - If the file does not exist or a field is missing/invalid
pub fn load_config(path: &str) -> Result<AzureConfig, Box<dyn Error>> {
    if !Path::new(path).exists() {
        return Err(format!("Config file not found: {path}").into());
    }
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("Error reading config file {path}: {e}"))?;
    log::info!("Reading config file: {path}");

    let mut deserializer = serde_json::Deserializer::from_str(&json);
    let config: AzureConfig = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing config {path}: path={} error={}", e.path(), e))?;
    Ok(config)
}
