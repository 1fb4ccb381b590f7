//! Autoscale rules and settings (`microsoft.insights`).

use super::rest::{ArmClient, ArmResponse};
use crate::config::INSIGHTS_API;
use crate::models::resource_id::{resource_group_id, resource_id, subscription_id_path, vmss_id};
use crate::models::{
    AutoscaleRule, AutoscaleSetting, ComparisonOperator, RuleTiming, ScaleCapacity,
    ScaleDirection,
};
use std::error::Error;

const AUTOSCALE_TYPE: &str = "microsoft.insights/autoscaleSettings";

/// Build an autoscale rule for a scale set. No request is made.
///
/// The rule compares the average of `metric_name` over `timing.time_window`
/// with `threshold` and changes capacity by `change_count` when it fires.
#[allow(clippy::too_many_arguments)]
pub fn create_autoscale_rule(
    subscription_id: &str,
    rg: &str,
    vmss_name: &str,
    metric_name: &str,
    operator: ComparisonOperator,
    threshold: f64,
    direction: ScaleDirection,
    change_count: u32,
    timing: &RuleTiming,
) -> AutoscaleRule {
    AutoscaleRule::new(
        &vmss_id(subscription_id, rg, vmss_name),
        metric_name,
        operator,
        threshold,
        direction,
        change_count,
        timing,
    )
}

/// Create (or replace) an autoscale setting targeting a scale set.
///
/// # Arguments
/// * `capacity` - min/max/default instance counts
/// * `rules` - rules for the single profile
/// * `notify` - optional address emailed on each scale operation
///
/// # Returns
/// * `Ok(ArmResponse)` - 201 with the setting (incl. `name`) when created
#[allow(clippy::too_many_arguments)]
pub async fn create_autoscale_setting(
    client: &ArmClient,
    rg: &str,
    setting_name: &str,
    vmss_name: &str,
    location: &str,
    capacity: ScaleCapacity,
    rules: Vec<AutoscaleRule>,
    notify: Option<&str>,
) -> Result<ArmResponse, Box<dyn Error>> {
    let subscription_id = client.subscription_id();
    let path = resource_id(subscription_id, rg, AUTOSCALE_TYPE, setting_name);
    let body = AutoscaleSetting::new(
        setting_name,
        location,
        &vmss_id(subscription_id, rg, vmss_name),
        capacity,
        rules,
        notify,
    );
    client.put_json(&path, INSIGHTS_API, &body).await
}

pub async fn get_autoscale_setting(
    client: &ArmClient,
    rg: &str,
    setting_name: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_id(client.subscription_id(), rg, AUTOSCALE_TYPE, setting_name);
    client.get_json(&path, INSIGHTS_API).await
}

pub async fn delete_autoscale_setting(
    client: &ArmClient,
    rg: &str,
    setting_name: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_id(client.subscription_id(), rg, AUTOSCALE_TYPE, setting_name);
    client.delete(&path, INSIGHTS_API).await
}

/// All autoscale settings in the subscription.
pub async fn list_autoscale_settings(client: &ArmClient) -> Result<ArmResponse, Box<dyn Error>> {
    let path = format!(
        "{}/providers/{AUTOSCALE_TYPE}",
        subscription_id_path(client.subscription_id())
    );
    client.get_json(&path, INSIGHTS_API).await
}

/// Autoscale settings in one resource group.
pub async fn list_autoscale_settings_rg(
    client: &ArmClient,
    rg: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = format!(
        "{}/providers/{AUTOSCALE_TYPE}",
        resource_group_id(client.subscription_id(), rg)
    );
    client.get_json(&path, INSIGHTS_API).await
}
