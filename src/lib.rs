//! Azure Resource Manager client and autoscale scenario.
//!
//! Module organization:
//! - [`config`] - constants and credentials file
//! - [`azure`] - tokens, [`azure::ArmClient`] and the ARM calls
//! - [`models`] - request/response bodies
//! - [`names`] - random resource names
//! - [`workflow`] - the provision/autoscale/teardown scenario
//! - [`output`] - terminal summary

pub mod azure;
pub mod config;
pub mod models;
pub mod names;
pub mod output;
pub mod workflow;

use config::AzureConfig;
use std::error::Error;

pub use workflow::{Scenario, ScenarioNames};

/// Get a token for `config` and build a client against `endpoint`.
pub async fn connect(
    config: &AzureConfig,
    source: azure::TokenSource,
    authority: &str,
    endpoint: &str,
) -> Result<azure::ArmClient, Box<dyn Error>> {
    let token = azure::token_for(source, authority, config).await?;
    azure::ArmClient::new(endpoint, &config.subscription_id, &token)
}

/// Load credentials, connect and run the full scenario once.
///
/// # Returns
/// * `Ok(Deployment)` - what was created (and deleted again)
/// * `Err` - the first failing step
pub async fn run_autoscale_scenario(
    config_file: &str,
) -> Result<models::Deployment, Box<dyn Error>> {
    let config = config::load_config(config_file)?;
    let client = connect(
        &config,
        azure::TokenSource::from_env(),
        config::AZURE_AUTHORITY_HOST,
        &config::rm_endpoint(),
    )
    .await?;

    let mut scenario = Scenario::new(client, &config.location);
    if let Some(email) = config::notify_email() {
        log::info!("Autoscale notifications go to {email}");
        scenario = scenario.with_notify(&email);
    }
    scenario.run().await?;
    Ok(scenario.deployment().clone())
}
