//! Virtual machine scale set request bodies.

use super::SubResource;
use serde::{Deserialize, Serialize};

/// How instances authenticate the admin user.
#[derive(Debug, Clone, PartialEq)]
pub enum VmAuth {
    Password(String),
    /// OpenSSH public key; password login is disabled.
    SshKey(String),
}

/// Marketplace image reference.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ImageReference {
    pub publisher: String,
    pub offer: String,
    pub sku: String,
    pub version: String,
}

impl ImageReference {
    pub fn new(publisher: &str, offer: &str, sku: &str, version: &str) -> ImageReference {
        ImageReference {
            publisher: publisher.to_string(),
            offer: offer.to_string(),
            sku: sku.to_string(),
            version: version.to_string(),
        }
    }
}

/// Everything needed to create a scale set wired to an existing subnet and load balancer.
#[derive(Debug, Clone)]
pub struct VmssParams {
    pub name: String,
    pub location: String,
    pub vm_size: String,
    pub capacity: u32,
    pub image: ImageReference,
    /// Blob container URLs for the os disk VHDs.
    pub vhd_containers: Vec<String>,
    pub subnet_id: String,
    pub backend_pool_id: String,
    pub nat_pool_id: String,
    pub username: String,
    pub auth: VmAuth,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VmssSku {
    pub name: String,
    pub tier: String,
    pub capacity: u32,
}

/// `PUT .../Microsoft.Compute/virtualMachineScaleSets/{name}` body.
#[derive(Serialize, Debug, Clone)]
pub struct VirtualMachineScaleSet {
    pub location: String,
    pub sku: VmssSku,
    pub properties: VmssProperties,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VmssProperties {
    pub overprovision: bool,
    pub upgrade_policy: UpgradePolicy,
    pub virtual_machine_profile: VmProfile,
}

#[derive(Serialize, Debug, Clone)]
pub struct UpgradePolicy {
    pub mode: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct VmProfile {
    pub storage_profile: StorageProfile,
    pub os_profile: OsProfile,
    pub network_profile: NetworkProfile,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StorageProfile {
    pub image_reference: ImageReference,
    pub os_disk: OsDisk,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OsDisk {
    pub name: String,
    pub vhd_containers: Vec<String>,
    pub caching: String,
    pub create_option: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OsProfile {
    pub computer_name_prefix: String,
    pub admin_username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linux_configuration: Option<LinuxConfiguration>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LinuxConfiguration {
    pub disable_password_authentication: bool,
    pub ssh: SshConfiguration,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SshConfiguration {
    pub public_keys: Vec<SshPublicKey>,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SshPublicKey {
    pub path: String,
    pub key_data: String,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    pub network_interface_configurations: Vec<NicConfiguration>,
}

#[derive(Serialize, Debug, Clone)]
pub struct NicConfiguration {
    pub name: String,
    pub properties: NicProperties,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NicProperties {
    pub primary: bool,
    pub ip_configurations: Vec<IpConfiguration>,
}

#[derive(Serialize, Debug, Clone)]
pub struct IpConfiguration {
    pub name: String,
    pub properties: IpConfigurationProperties,
}

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct IpConfigurationProperties {
    pub subnet: SubResource,
    pub load_balancer_backend_address_pools: Vec<SubResource>,
    pub load_balancer_inbound_nat_pools: Vec<SubResource>,
}

impl From<&VmssParams> for VirtualMachineScaleSet {
    fn from(p: &VmssParams) -> Self {
        let (admin_password, linux_configuration) = match &p.auth {
            VmAuth::Password(pw) => (Some(pw.clone()), None),
            VmAuth::SshKey(key) => (
                None,
                Some(LinuxConfiguration {
                    disable_password_authentication: true,
                    ssh: SshConfiguration {
                        public_keys: vec![SshPublicKey {
                            path: format!("/home/{}/.ssh/authorized_keys", p.username),
                            key_data: key.clone(),
                        }],
                    },
                }),
            ),
        };

        VirtualMachineScaleSet {
            location: p.location.clone(),
            sku: VmssSku {
                name: p.vm_size.clone(),
                tier: "Standard".to_string(),
                capacity: p.capacity,
            },
            properties: VmssProperties {
                overprovision: true,
                upgrade_policy: UpgradePolicy {
                    mode: "Manual".to_string(),
                },
                virtual_machine_profile: VmProfile {
                    storage_profile: StorageProfile {
                        image_reference: p.image.clone(),
                        os_disk: OsDisk {
                            name: format!("{}osdisk", p.name),
                            vhd_containers: p.vhd_containers.clone(),
                            caching: "ReadWrite".to_string(),
                            create_option: "FromImage".to_string(),
                        },
                    },
                    os_profile: OsProfile {
                        computer_name_prefix: p.name.clone(),
                        admin_username: p.username.clone(),
                        admin_password,
                        linux_configuration,
                    },
                    network_profile: NetworkProfile {
                        network_interface_configurations: vec![NicConfiguration {
                            name: format!("{}nic", p.name),
                            properties: NicProperties {
                                primary: true,
                                ip_configurations: vec![IpConfiguration {
                                    name: format!("{}ipconfig", p.name),
                                    properties: IpConfigurationProperties {
                                        subnet: SubResource::new(&p.subnet_id),
                                        load_balancer_backend_address_pools: vec![
                                            SubResource::new(&p.backend_pool_id),
                                        ],
                                        load_balancer_inbound_nat_pools: vec![SubResource::new(
                                            &p.nat_pool_id,
                                        )],
                                    },
                                }],
                            },
                        }],
                    },
                },
            },
        }
    }
}

/// Body for changing only the sku (size/capacity) of an existing scale set.
#[derive(Serialize, Debug, Clone)]
pub struct VmssScale {
    pub sku: VmssSku,
}

/// The parts of a scale set GET response the workflow reads.
#[derive(Deserialize, Debug, Clone)]
pub struct VmssResource {
    pub id: String,
    pub name: String,
    pub sku: VmssSku,
}
