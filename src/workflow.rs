//! End-to-end autoscale scenario.
//!
//! Setup provisions a scale set behind a load balancer, the test attaches
//! CPU based autoscale rules to it, teardown deletes the resource group.
//! Every call is checked against the status ARM is expected to return.

use crate::azure::{compute, insights, network, resources, storage, ArmClient};
use crate::config::{self, status};
use crate::models::storage::vhd_container_url;
use crate::models::{
    AutoscaleRule, AutoscaleSettingResource, ComparisonOperator, Deployment, IdOnly,
    ImageReference, LoadBalancerCreated, NatPorts, RuleTiming, ScaleCapacity, ScaleDirection,
    VmAuth, VmssParams, VnetCreated,
};
use crate::names;
use colored::Colorize;
use std::error::Error;
use std::time::Duration;

pub const STORAGE_ACCOUNT_COUNT: usize = 5;
pub const STORAGE_TYPE: &str = "Standard_LRS";
pub const VNET_ADDRESS_PREFIX: &str = "10.0.0.0/16";
pub const NAT_PORTS: NatPorts = NatPorts {
    frontend_start: 50000,
    frontend_end: 50100,
    backend: 22,
};
pub const VMSS_CAPACITY: u32 = 1;
pub const VM_SIZE: &str = "Standard_D1";
pub const VM_USERNAME: &str = "rootuser";
pub const METRIC_NAME: &str = "Percentage CPU";
pub const CPU_THRESHOLD: f64 = 60.0;
pub const CHANGE_COUNT: u32 = 1;
pub const AUTOSCALE_MIN: u32 = 1;
pub const AUTOSCALE_MAX: u32 = 10;
pub const AUTOSCALE_DEFAULT: u32 = 3;

pub fn default_image() -> ImageReference {
    ImageReference::new("Canonical", "UbuntuServer", "16.04.0-LTS", "latest")
}

/// Resource names used by one scenario run.
#[derive(Debug, Clone)]
pub struct ScenarioNames {
    pub resource_group: String,
    pub vnet: String,
    pub vmss: String,
    pub setting: String,
}

impl ScenarioNames {
    pub fn random() -> ScenarioNames {
        ScenarioNames {
            resource_group: names::random_name("rg"),
            vnet: names::random_name("vnet"),
            vmss: names::random_name("vmss"),
            setting: names::random_name("scale"),
        }
    }
}

pub struct Scenario {
    client: ArmClient,
    names: ScenarioNames,
    deployment: Deployment,
    pace: Duration,
    notify: Option<String>,
}

impl Scenario {
    pub fn new(client: ArmClient, location: &str) -> Scenario {
        Scenario::with_names(client, location, ScenarioNames::random())
    }

    pub fn with_names(client: ArmClient, location: &str, names: ScenarioNames) -> Scenario {
        let deployment = Deployment {
            resource_group: names.resource_group.clone(),
            location: location.to_string(),
            ..Default::default()
        };
        Scenario {
            client,
            names,
            deployment,
            pace: Duration::from_millis(config::SLEEP_MSEC),
            notify: None,
        }
    }

    /// Pause between provisioning calls.
    pub fn with_pace(mut self, pace: Duration) -> Scenario {
        self.pace = pace;
        self
    }

    /// Email this address on every autoscale operation.
    pub fn with_notify(mut self, email: &str) -> Scenario {
        self.notify = Some(email.to_string());
        self
    }

    pub fn deployment(&self) -> &Deployment {
        &self.deployment
    }

    async fn pause(&self) {
        if !self.pace.is_zero() {
            tokio::time::sleep(self.pace).await;
        }
    }

    /// Provision resource group, vnet, public ip, storage, load balancer and scale set.
    pub async fn setup(&mut self) -> Result<(), Box<dyn Error>> {
        let rg = self.names.resource_group.clone();
        let location = self.deployment.location.clone();
        let vnet = self.names.vnet.clone();
        let vmss = self.names.vmss.clone();

        log::info!("Creating resource group: {}", rg.green());
        resources::create_resource_group(&self.client, &rg, &location)
            .await?
            .expect_status(status::CREATED, "create resource group")?;
        self.deployment.resource_group_created = true;
        self.pause().await;

        log::info!("Creating vnet: {}", vnet.green());
        let response = network::create_vnet(
            &self.client,
            &rg,
            &vnet,
            &location,
            VNET_ADDRESS_PREFIX,
            VNET_ADDRESS_PREFIX,
            None,
        )
        .await?
        .expect_status(status::CREATED, "create vnet")?;
        let created: VnetCreated = response.parse("vnet")?;
        self.deployment.vnet_name = vnet.clone();
        self.deployment.subnet_id = created
            .first_subnet_id()
            .ok_or("vnet response has no properties.subnets[0].id")?
            .to_string();
        self.pause().await;

        let ip_name = format!("{vnet}ip2");
        log::info!("Creating VMSS LB public ip address: {}", ip_name.green());
        let response =
            network::create_public_ip(&self.client, &rg, &ip_name, &format!("{vnet}2"), &location)
                .await?
                .expect_status(status::CREATED, "create public ip")?;
        let created: IdOnly = response.parse("public ip")?;
        self.deployment.public_ip_name = ip_name;
        self.deployment.public_ip_id = created.id;
        self.pause().await;

        log::info!("Creating {STORAGE_ACCOUNT_COUNT} storage accounts for scale set");
        for _ in 0..STORAGE_ACCOUNT_COUNT {
            let account = names::storage_account_name();
            log::info!("Creating storage account: {}", account.green());
            storage::create_storage_account(&self.client, &rg, &account, &location, STORAGE_TYPE)
                .await?
                .expect_status(status::ACCEPTED, "create storage account")?;
            self.deployment
                .vhd_containers
                .push(vhd_container_url(&account, &vmss));
            self.deployment.storage_accounts.push(account);
        }
        self.pause().await;

        let lb_name = format!("{vnet}lb");
        log::info!("Creating load balancer with nat pool: {}", lb_name.green());
        let response = network::create_lb_with_nat_pool(
            &self.client,
            &rg,
            &lb_name,
            &self.deployment.public_ip_id,
            NAT_PORTS,
            &location,
        )
        .await?
        .expect_any(&[status::OK, status::CREATED], "create load balancer")?;
        let created: LoadBalancerCreated = response.parse("load balancer")?;
        self.deployment.lb_name = lb_name;
        self.deployment.backend_pool_id = created
            .backend_pool_id()
            .ok_or("load balancer response has no backendAddressPools[0].id")?
            .to_string();
        self.deployment.nat_pool_id = created
            .nat_pool_id()
            .ok_or("load balancer response has no inboundNatPools[0].id")?
            .to_string();
        self.pause().await;

        let params = VmssParams {
            name: vmss.clone(),
            location: location.clone(),
            vm_size: VM_SIZE.to_string(),
            capacity: VMSS_CAPACITY,
            image: default_image(),
            vhd_containers: self.deployment.vhd_containers.clone(),
            subnet_id: self.deployment.subnet_id.clone(),
            backend_pool_id: self.deployment.backend_pool_id.clone(),
            nat_pool_id: self.deployment.nat_pool_id.clone(),
            username: VM_USERNAME.to_string(),
            auth: VmAuth::Password(names::random_password()),
        };
        log::info!(
            "Creating VMSS: {}, capacity = {}",
            vmss.green(),
            params.capacity
        );
        compute::create_vmss(&self.client, &rg, &params)
            .await?
            .expect_any(&[status::OK, status::CREATED], "create vmss")?;
        self.deployment.vmss_name = vmss;

        Ok(())
    }

    /// The two CPU rules: scale out above the threshold, scale in below it.
    pub fn cpu_rules(&self) -> Vec<AutoscaleRule> {
        let timing = RuleTiming::default();
        [
            (ComparisonOperator::GreaterThan, ScaleDirection::Increase),
            (ComparisonOperator::LessThan, ScaleDirection::Decrease),
        ]
        .into_iter()
        .map(|(operator, direction)| {
            insights::create_autoscale_rule(
                self.client.subscription_id(),
                &self.names.resource_group,
                &self.names.vmss,
                METRIC_NAME,
                operator,
                CPU_THRESHOLD,
                direction,
                CHANGE_COUNT,
                &timing,
            )
        })
        .collect()
    }

    /// Attach the CPU autoscale setting to the scale set.
    pub async fn test_insights(&mut self) -> Result<AutoscaleSettingResource, Box<dyn Error>> {
        log::info!("Creating autoscale rules");
        let rules = self.cpu_rules();
        for rule in &rules {
            log::debug!("rule: {rule}");
        }

        let setting = self.names.setting.clone();
        log::info!("Creating autoscale setting: {}", setting.green());
        let capacity = ScaleCapacity::new(AUTOSCALE_MIN, AUTOSCALE_MAX, AUTOSCALE_DEFAULT)?;
        let response = insights::create_autoscale_setting(
            &self.client,
            &self.names.resource_group,
            &setting,
            &self.names.vmss,
            &self.deployment.location,
            capacity,
            rules,
            self.notify.as_deref(),
        )
        .await?
        .expect_status(status::CREATED, "create autoscale setting")?;

        let created: AutoscaleSettingResource = response.parse("autoscale setting")?;
        if created.name != setting {
            return Err(format!(
                "Autoscale setting name mismatch: requested {setting}, got {}",
                created.name
            )
            .into());
        }
        self.deployment.autoscale_setting = Some(created.name.clone());
        Ok(created)
    }

    /// Delete the resource group, which removes everything the scenario created.
    pub async fn teardown(&mut self) -> Result<(), Box<dyn Error>> {
        let rg = &self.names.resource_group;
        log::info!("Deleting resource group: {}", rg.yellow());
        resources::delete_resource_group(&self.client, rg)
            .await?
            .expect_status(status::ACCEPTED, "delete resource group")?;
        self.deployment.resource_group_created = false;
        Ok(())
    }

    /// Setup, test and teardown. Teardown runs whenever the resource group was
    /// created; the first error wins.
    pub async fn run(&mut self) -> Result<AutoscaleSettingResource, Box<dyn Error>> {
        let outcome = match self.setup().await {
            Ok(()) => self.test_insights().await,
            Err(e) => {
                log::error!("{} {e}", "setup failed:".on_red());
                Err(e)
            }
        };

        if self.deployment.resource_group_created {
            if let Err(e) = self.teardown().await {
                log::error!("{} {e}", "teardown failed:".on_red());
                if outcome.is_ok() {
                    return Err(e);
                }
            }
        }
        outcome
    }
}
