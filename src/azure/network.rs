//! Virtual network, public ip and load balancer operations.

use super::rest::{ArmClient, ArmResponse};
use crate::config::NETWORK_API;
use crate::models::network::{LoadBalancer, PublicIpAddress, VirtualNetwork};
use crate::models::resource_id::{lb_frontend_id, resource_id};
use crate::models::NatPorts;
use std::error::Error;

/// Create a vnet with a single subnet named `subnet`.
///
/// The subnet id ARM assigns is at `/properties/subnets/0/id` in the response.
pub async fn create_vnet(
    client: &ArmClient,
    rg: &str,
    vnet_name: &str,
    location: &str,
    address_prefix: &str,
    subnet_prefix: &str,
    nsg_id: Option<&str>,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_id(
        client.subscription_id(),
        rg,
        "Microsoft.Network/virtualNetworks",
        vnet_name,
    );
    let body = VirtualNetwork::new(location, address_prefix, subnet_prefix, nsg_id);
    client.put_json(&path, NETWORK_API, &body).await
}

/// Create a dynamic public ip with a DNS label (`<label>.<location>.cloudapp.azure.com`).
pub async fn create_public_ip(
    client: &ArmClient,
    rg: &str,
    ip_name: &str,
    dns_label: &str,
    location: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let path = resource_id(
        client.subscription_id(),
        rg,
        "Microsoft.Network/publicIPAddresses",
        ip_name,
    );
    let body = PublicIpAddress::new(location, dns_label);
    client.put_json(&path, NETWORK_API, &body).await
}

/// Create a load balancer fronting `public_ip_id` with a backend pool and an inbound NAT pool.
pub async fn create_lb_with_nat_pool(
    client: &ArmClient,
    rg: &str,
    lb_name: &str,
    public_ip_id: &str,
    ports: NatPorts,
    location: &str,
) -> Result<ArmResponse, Box<dyn Error>> {
    let subscription_id = client.subscription_id();
    let path = resource_id(subscription_id, rg, "Microsoft.Network/loadBalancers", lb_name);
    let body = LoadBalancer::with_nat_pool(location, lb_name, public_ip_id, ports, |frontend| {
        lb_frontend_id(subscription_id, rg, lb_name, frontend)
    });
    client.put_json(&path, NETWORK_API, &body).await
}
