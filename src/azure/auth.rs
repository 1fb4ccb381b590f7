//! Access tokens for Azure Resource Manager.
//!
//! Two sources:
//! - service principal client credentials (OAuth2 `client_credentials` grant)
//! - the signed-in Azure CLI (`az account get-access-token`)

use super::cli;
use crate::config::{AzureConfig, AZURE_RESOURCE};
use serde::Deserialize;
use std::error::Error;
use std::time::Duration;

/// Response from the OAuth2 token endpoint. `expires_in` is a string on the v1 endpoint.
#[derive(Deserialize, Debug)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    token_type: Option<String>,
    #[serde(default)]
    expires_in: Option<serde_json::Value>,
}

/// Output of `az account get-access-token --output json`.
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct CliToken {
    access_token: String,
    #[serde(default)]
    expires_on: Option<String>,
}

/// Which credentials to use for the ARM bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    ServicePrincipal,
    AzureCli,
}

impl TokenSource {
    /// `AZURERM_AUTH=cli` selects the Azure CLI, anything else the service principal.
    pub fn from_env() -> TokenSource {
        match std::env::var("AZURERM_AUTH").as_deref() {
            Ok("cli") => TokenSource::AzureCli,
            _ => TokenSource::ServicePrincipal,
        }
    }
}

/// Get an ARM access token for a service principal.
///
/// # Arguments
/// * `authority` - Token authority host, normally [`crate::config::AZURE_AUTHORITY_HOST`]
/// * `tenant_id`, `app_id`, `app_secret` - Service principal credentials
///
/// # Returns
/// * `Ok(String)` - The bearer token
/// * `Err` - If the request fails or the authority rejects the credentials
pub async fn get_access_token(
    authority: &str,
    tenant_id: &str,
    app_id: &str,
    app_secret: &str,
) -> Result<String, Box<dyn Error>> {
    let url = format!("{}/{tenant_id}/oauth2/token", authority.trim_end_matches('/'));
    log::info!("Requesting access token for app {app_id} from {url}");

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {e}"))?;

    let response = http
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", app_id),
            ("client_secret", app_secret),
            ("resource", AZURE_RESOURCE),
        ])
        .send()
        .await
        .map_err(|e| format!("Failed to reach token endpoint {url}: {e}"))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| format!("Failed to read token response: {e}"))?;
    if !status.is_success() {
        return Err(format!("Token request rejected: status={status} body={text}").into());
    }

    let mut deserializer = serde_json::Deserializer::from_str(&text);
    let token: TokenResponse = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing token response: path={} error={}", e.path(), e))?;
    log::debug!(
        "Got token type={:?} expires_in={:?}",
        token.token_type,
        token.expires_in
    );
    Ok(token.access_token)
}

/// Get an ARM access token from the signed-in Azure CLI.
pub async fn get_access_token_cli() -> Result<String, Box<dyn Error>> {
    let output = cli::run_blocking(&format!(
        "az account get-access-token --resource {AZURE_RESOURCE} --output json"
    ))
    .await?;
    let token = parse_cli_token(&output)?;
    log::info!("Got access token from az cli, expires_on={:?}", token.expires_on);
    Ok(token.access_token)
}

fn parse_cli_token(output: &str) -> Result<CliToken, Box<dyn Error>> {
    let mut deserializer = serde_json::Deserializer::from_str(output);
    let token: CliToken = serde_path_to_error::deserialize(&mut deserializer)
        .map_err(|e| format!("Error parsing az cli token: path={} error={}", e.path(), e))?;
    Ok(token)
}

/// Token for `config` from the given source.
pub async fn token_for(
    source: TokenSource,
    authority: &str,
    config: &AzureConfig,
) -> Result<String, Box<dyn Error>> {
    match source {
        TokenSource::ServicePrincipal => {
            get_access_token(authority, &config.tenant_id, &config.app_id, &config.app_secret)
                .await
        }
        TokenSource::AzureCli => get_access_token_cli().await,
    }
}
