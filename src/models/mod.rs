//! Request and response models for the ARM calls.
//!
//! - [`network`] - vnet, public ip and load balancer bodies
//! - [`storage`] - storage account body
//! - [`compute`] - scale set body
//! - [`autoscale`] - autoscale rules and settings
//! - [`resource_id`] - ARM id/path builders
//! - [`Deployment`] - ids collected by the workflow

pub mod autoscale;
pub mod compute;
mod deployment;
pub mod network;
pub mod resource_id;
pub mod storage;

use serde::{Deserialize, Serialize};

pub use autoscale::{
    AutoscaleRule, AutoscaleSetting, AutoscaleSettingList, AutoscaleSettingResource,
    ComparisonOperator, RuleTiming, ScaleCapacity, ScaleDirection,
};
pub use compute::{ImageReference, VmAuth, VmssParams};
pub use deployment::Deployment;
pub use network::{LoadBalancerCreated, NatPorts, VnetCreated};

/// Reference to another resource by id: `{ "id": ... }`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SubResource {
    pub id: String,
}

impl SubResource {
    pub fn new(id: &str) -> SubResource {
        SubResource { id: id.to_string() }
    }
}

/// Any ARM response where only the top-level `id` matters.
#[derive(Deserialize, Debug, Clone)]
pub struct IdOnly {
    pub id: String,
}
