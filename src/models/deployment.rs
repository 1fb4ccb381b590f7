//! Identifiers collected while provisioning.

use serde::Serialize;

/// What the workflow created, referenced by the ids ARM returned.
#[derive(Serialize, Debug, Default, Clone)]
pub struct Deployment {
    pub resource_group: String,
    pub location: String,
    /// Set once the resource group create returned the expected status.
    pub resource_group_created: bool,
    pub vnet_name: String,
    pub subnet_id: String,
    pub public_ip_name: String,
    pub public_ip_id: String,
    pub storage_accounts: Vec<String>,
    pub vhd_containers: Vec<String>,
    pub lb_name: String,
    pub backend_pool_id: String,
    pub nat_pool_id: String,
    pub vmss_name: String,
    pub autoscale_setting: Option<String>,
}
