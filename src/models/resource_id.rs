//! ARM resource id builders.
//!
//! Ids are also request paths: `PUT {endpoint}{id}?api-version=...`.

/// `/subscriptions/{subscription_id}`
pub fn subscription_id_path(subscription_id: &str) -> String {
    format!("/subscriptions/{subscription_id}")
}

/// `/subscriptions/{subscription_id}/resourceGroups/{rg}`
pub fn resource_group_id(subscription_id: &str, rg: &str) -> String {
    format!("{}/resourceGroups/{rg}", subscription_id_path(subscription_id))
}

/// Id of a top-level resource, e.g. `provider_type = "Microsoft.Network/virtualNetworks"`.
pub fn resource_id(subscription_id: &str, rg: &str, provider_type: &str, name: &str) -> String {
    format!(
        "{}/providers/{provider_type}/{name}",
        resource_group_id(subscription_id, rg)
    )
}

pub fn vmss_id(subscription_id: &str, rg: &str, vmss_name: &str) -> String {
    resource_id(
        subscription_id,
        rg,
        "Microsoft.Compute/virtualMachineScaleSets",
        vmss_name,
    )
}

pub fn load_balancer_id(subscription_id: &str, rg: &str, lb_name: &str) -> String {
    resource_id(subscription_id, rg, "Microsoft.Network/loadBalancers", lb_name)
}

/// Frontend ip configuration inside a load balancer (child resource).
pub fn lb_frontend_id(subscription_id: &str, rg: &str, lb_name: &str, frontend: &str) -> String {
    format!(
        "{}/frontendIPConfigurations/{frontend}",
        load_balancer_id(subscription_id, rg, lb_name)
    )
}
