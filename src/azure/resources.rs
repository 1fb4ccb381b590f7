//! Resource group operations.

use super::rest::{ArmClient, ArmResponse};
use crate::config::RESOURCE_API;
use crate::models::resource_id::{resource_group_id, subscription_id_path};
use serde_json::json;
use std::error::Error;

/// `PUT` a resource group. ARM answers 201 when it is new, 200 when it already existed.
pub async fn create_resource_group(
    client: &ArmClient,
    rg: &str,
    location: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_group_id(client.subscription_id(), rg);
    client
        .put_json(&path, RESOURCE_API, &json!({ "location": location }))
        .await
}

/// Delete a resource group and everything in it. ARM answers 202 and deletes asynchronously.
pub async fn delete_resource_group(
    client: &ArmClient,
    rg: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_group_id(client.subscription_id(), rg);
    client.delete(&path, RESOURCE_API).await
}

pub async fn get_resource_group(
    client: &ArmClient,
    rg: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_group_id(client.subscription_id(), rg);
    client.get_json(&path, RESOURCE_API).await
}

pub async fn list_resource_groups(client: &ArmClient) -> Result<ArmResponse, Box<dyn Error>> {
    let path = format!("{}/resourceGroups", subscription_id_path(client.subscription_id()));
    client.get_json(&path, RESOURCE_API).await
}
