//! Virtual machine scale set operations.

use super::rest::{ArmClient, ArmResponse};
use crate::config::COMPUTE_API;
use crate::models::compute::{VirtualMachineScaleSet, VmssScale, VmssSku};
use crate::models::resource_id::vmss_id;
use crate::models::VmssParams;
use std::error::Error;

pub async fn create_vmss(
    client: &ArmClient,
    rg: &str,
    params: &VmssParams,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = vmss_id(client.subscription_id(), rg, &params.name);
    let body = VirtualMachineScaleSet::from(params);
    client.put_json(&path, COMPUTE_API, &body).await
}

pub async fn get_vmss(
    client: &ArmClient,
    rg: &str,
    vmss_name: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = vmss_id(client.subscription_id(), rg, vmss_name);
    client.get_json(&path, COMPUTE_API).await
}

/// Change the size and/or instance count of an existing scale set.
pub async fn scale_vmss(
    client: &ArmClient,
    rg: &str,
    vmss_name: &str,
    size: &str,
    tier: &str,
    capacity: u32,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = vmss_id(client.subscription_id(), rg, vmss_name);
    let body = VmssScale {
        sku: VmssSku {
            name: size.to_string(),
            tier: tier.to_string(),
            capacity,
        },
    };
    client.patch_json(&path, COMPUTE_API, &body).await
}
