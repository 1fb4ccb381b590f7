//! Network request bodies (vnet, public ip, load balancer) and the response
//! fields the workflow reads back.

use super::SubResource;
use serde::{Deserialize, Serialize};

/// `PUT .../Microsoft.Network/virtualNetworks/{name}` body.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VirtualNetwork {
    pub location: String,
    pub properties: VnetProperties,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VnetProperties {
    pub address_space: AddressSpace,
    pub subnets: Vec<SubnetSpec>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AddressSpace {
    pub address_prefixes: Vec<String>,
}

#[derive(Serialize, Debug, Clone)]
pub struct SubnetSpec {
    pub name: String,
    pub properties: SubnetProperties,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubnetProperties {
    pub address_prefix: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub network_security_group: Option<SubResource>,
}

/// Name given to the single subnet created with a vnet.
pub const DEFAULT_SUBNET_NAME: &str = "subnet";

impl VirtualNetwork {
    /// Vnet with one subnet named [`DEFAULT_SUBNET_NAME`]; the NSG is only attached when given.
    pub fn new(
        location: &str,
        address_prefix: &str,
        subnet_prefix: &str,
        nsg_id: Option<&str>,
    ) -> VirtualNetwork {
        VirtualNetwork {
            location: location.to_string(),
            properties: VnetProperties {
                address_space: AddressSpace {
                    address_prefixes: vec![address_prefix.to_string()],
                },
                subnets: vec![SubnetSpec {
                    name: DEFAULT_SUBNET_NAME.to_string(),
                    properties: SubnetProperties {
                        address_prefix: subnet_prefix.to_string(),
                        network_security_group: nsg_id.map(SubResource::new),
                    },
                }],
            },
        }
    }
}

/// `PUT .../Microsoft.Network/publicIPAddresses/{name}` body.
#[derive(Serialize, Debug, Clone)]
pub struct PublicIpAddress {
    pub location: String,
    pub properties: PublicIpProperties,
}

#[derive(Serialize, Debug, Clone)]
pub struct PublicIpProperties {
    #[serde(rename = "publicIPAllocationMethod")]
    pub allocation_method: String,
    #[serde(rename = "dnsSettings")]
    pub dns_settings: DnsSettings,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DnsSettings {
    pub domain_name_label: String,
}

impl PublicIpAddress {
    pub fn new(location: &str, dns_label: &str) -> PublicIpAddress {
        PublicIpAddress {
            location: location.to_string(),
            properties: PublicIpProperties {
                allocation_method: "Dynamic".to_string(),
                dns_settings: DnsSettings {
                    domain_name_label: dns_label.to_string(),
                },
            },
        }
    }
}

/// `PUT .../Microsoft.Network/loadBalancers/{name}` body.
#[derive(Serialize, Debug, Clone)]
pub struct LoadBalancer {
    pub location: String,
    pub properties: LoadBalancerProperties,
}

#[derive(Serialize, Debug, Clone)]
pub struct LoadBalancerProperties {
    #[serde(rename = "frontendIPConfigurations")]
    pub frontend_ip_configurations: Vec<FrontendIpConfiguration>,
    #[serde(rename = "backendAddressPools")]
    pub backend_address_pools: Vec<BackendAddressPool>,
    #[serde(rename = "inboundNatPools")]
    pub inbound_nat_pools: Vec<InboundNatPool>,
}

#[derive(Serialize, Debug, Clone)]
pub struct FrontendIpConfiguration {
    pub name: String,
    pub properties: FrontendIpProperties,
}

#[derive(Serialize, Debug, Clone)]
pub struct FrontendIpProperties {
    #[serde(rename = "publicIPAddress")]
    pub public_ip_address: SubResource,
}

#[derive(Serialize, Debug, Clone)]
pub struct BackendAddressPool {
    pub name: String,
}

#[derive(Serialize, Debug, Clone)]
pub struct InboundNatPool {
    pub name: String,
    pub properties: InboundNatPoolProperties,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InboundNatPoolProperties {
    #[serde(rename = "frontendIPConfiguration")]
    pub frontend_ip_configuration: SubResource,
    pub protocol: String,
    pub frontend_port_range_start: u16,
    pub frontend_port_range_end: u16,
    pub backend_port: u16,
}

/// Frontend port range and backend port of an inbound NAT pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NatPorts {
    pub frontend_start: u16,
    pub frontend_end: u16,
    pub backend: u16,
}

impl LoadBalancer {
    /// Load balancer with one public frontend, one backend pool and one tcp NAT pool.
    ///
    /// Child names are derived from `lb_name`: `<lb>LoadBalancerFrontEnd`,
    /// `<lb>bepool` and `<lb>natpool`. The NAT pool references the frontend by
    /// its full id, so `frontend_id_for` must produce the id ARM will assign.
    pub fn with_nat_pool(
        location: &str,
        lb_name: &str,
        public_ip_id: &str,
        ports: NatPorts,
        frontend_id_for: impl Fn(&str) -> String,
    ) -> LoadBalancer {
        let frontend_name = format!("{lb_name}LoadBalancerFrontEnd");
        let frontend_id = frontend_id_for(&frontend_name);
        LoadBalancer {
            location: location.to_string(),
            properties: LoadBalancerProperties {
                frontend_ip_configurations: vec![FrontendIpConfiguration {
                    name: frontend_name,
                    properties: FrontendIpProperties {
                        public_ip_address: SubResource::new(public_ip_id),
                    },
                }],
                backend_address_pools: vec![BackendAddressPool {
                    name: format!("{lb_name}bepool"),
                }],
                inbound_nat_pools: vec![InboundNatPool {
                    name: format!("{lb_name}natpool"),
                    properties: InboundNatPoolProperties {
                        frontend_ip_configuration: SubResource::new(&frontend_id),
                        protocol: "tcp".to_string(),
                        frontend_port_range_start: ports.frontend_start,
                        frontend_port_range_end: ports.frontend_end,
                        backend_port: ports.backend,
                    },
                }],
            },
        }
    }
}

/// Child resource as returned by ARM: `{ "name": ..., "id": ... }`.
#[derive(Deserialize, Debug, Clone)]
pub struct NamedId {
    #[serde(default)]
    pub name: Option<String>,
    pub id: String,
}

/// The parts of a vnet create response the workflow uses.
#[derive(Deserialize, Debug)]
pub struct VnetCreated {
    pub properties: VnetCreatedProperties,
}

#[derive(Deserialize, Debug)]
pub struct VnetCreatedProperties {
    #[serde(default)]
    pub subnets: Vec<NamedId>,
}

impl VnetCreated {
    pub fn first_subnet_id(&self) -> Option<&str> {
        self.properties.subnets.first().map(|s| s.id.as_str())
    }
}

/// The parts of a load balancer create response the workflow uses.
#[derive(Deserialize, Debug)]
pub struct LoadBalancerCreated {
    pub properties: LoadBalancerCreatedProperties,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoadBalancerCreatedProperties {
    #[serde(default)]
    pub backend_address_pools: Vec<NamedId>,
    #[serde(default)]
    pub inbound_nat_pools: Vec<NamedId>,
}

impl LoadBalancerCreated {
    pub fn backend_pool_id(&self) -> Option<&str> {
        self.properties
            .backend_address_pools
            .first()
            .map(|p| p.id.as_str())
    }

    pub fn nat_pool_id(&self) -> Option<&str> {
        self.properties.inbound_nat_pools.first().map(|p| p.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resource_id::lb_frontend_id;
    use serde_json::json;

    #[test]
    fn test_vnet_body_without_nsg() {
        let vnet = VirtualNetwork::new("westus", "10.0.0.0/16", "10.0.0.0/24", None);
        let body = serde_json::to_value(&vnet).unwrap();
        assert_eq!(
            body,
            json!({
                "location": "westus",
                "properties": {
                    "addressSpace": { "addressPrefixes": ["10.0.0.0/16"] },
                    "subnets": [
                        { "name": "subnet", "properties": { "addressPrefix": "10.0.0.0/24" } }
                    ]
                }
            })
        );
    }

    #[test]
    fn test_vnet_body_with_nsg() {
        let vnet = VirtualNetwork::new("westus", "10.0.0.0/16", "10.0.0.0/16", Some("/nsg/id"));
        let body = serde_json::to_value(&vnet).unwrap();
        assert_eq!(
            body["properties"]["subnets"][0]["properties"]["networkSecurityGroup"]["id"],
            "/nsg/id"
        );
    }

    #[test]
    fn test_public_ip_body() {
        let body = serde_json::to_value(PublicIpAddress::new("westus", "myvnet2")).unwrap();
        assert_eq!(body["properties"]["publicIPAllocationMethod"], "Dynamic");
        assert_eq!(
            body["properties"]["dnsSettings"]["domainNameLabel"],
            "myvnet2"
        );
    }

    #[test]
    fn test_lb_nat_pool_references_frontend() {
        let ports = NatPorts {
            frontend_start: 50000,
            frontend_end: 50100,
            backend: 22,
        };
        let lb = LoadBalancer::with_nat_pool("westus", "lb1", "/ip/id", ports, |fe| {
            lb_frontend_id("s", "rg", "lb1", fe)
        });
        let body = serde_json::to_value(&lb).unwrap();
        let props = &body["properties"];
        assert_eq!(
            props["frontendIPConfigurations"][0]["name"],
            "lb1LoadBalancerFrontEnd"
        );
        assert_eq!(
            props["frontendIPConfigurations"][0]["properties"]["publicIPAddress"]["id"],
            "/ip/id"
        );
        assert_eq!(props["backendAddressPools"][0]["name"], "lb1bepool");
        let nat = &props["inboundNatPools"][0];
        assert_eq!(nat["name"], "lb1natpool");
        assert_eq!(nat["properties"]["frontendPortRangeStart"], 50000);
        assert_eq!(nat["properties"]["frontendPortRangeEnd"], 50100);
        assert_eq!(nat["properties"]["backendPort"], 22);
        assert_eq!(nat["properties"]["protocol"], "tcp");
        assert_eq!(
            nat["properties"]["frontendIPConfiguration"]["id"],
            "/subscriptions/s/resourceGroups/rg/providers/Microsoft.Network/loadBalancers/lb1/frontendIPConfigurations/lb1LoadBalancerFrontEnd"
        );
    }

    #[test]
    fn test_vnet_created_subnet_id() {
        let json = std::fs::read_to_string("src/tests/test_data/vnet_created.json").unwrap();
        let vnet: VnetCreated = serde_json::from_str(&json).unwrap();
        assert_eq!(
            vnet.first_subnet_id(),
            Some("/subscriptions/sub-0001/resourceGroups/rg-test/providers/Microsoft.Network/virtualNetworks/testvnet/subnets/subnet")
        );
    }

    #[test]
    fn test_lb_created_pool_ids() {
        let json = std::fs::read_to_string("src/tests/test_data/lb_created.json").unwrap();
        let lb: LoadBalancerCreated = serde_json::from_str(&json).unwrap();
        assert!(lb.backend_pool_id().unwrap().ends_with("/backendAddressPools/testvnetlbbepool"));
        assert!(lb.nat_pool_id().unwrap().ends_with("/inboundNatPools/testvnetlbnatpool"));
    }
}
