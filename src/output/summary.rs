//! Summary of a scenario run.

use super::terminal::format_field;
use crate::models::Deployment;
use colored::Colorize;
use itertools::Itertools;

/// `(kind, name/id)` rows describing what was provisioned.
pub fn summary_rows(d: &Deployment) -> Vec<(&'static str, String)> {
    let mut rows = vec![
        ("resource_group", d.resource_group.clone()),
        ("location", d.location.clone()),
        ("vnet", d.vnet_name.clone()),
        ("subnet", d.subnet_id.clone()),
        ("public_ip", d.public_ip_id.clone()),
        ("storage", d.storage_accounts.iter().join(" ")),
        ("load_balancer", d.lb_name.clone()),
        ("backend_pool", d.backend_pool_id.clone()),
        ("nat_pool", d.nat_pool_id.clone()),
        ("vmss", d.vmss_name.clone()),
    ];
    if let Some(setting) = &d.autoscale_setting {
        rows.push(("autoscale", setting.clone()));
    }
    rows
}

/// Print the provisioned resources as quoted, aligned rows.
pub fn print_summary(d: &Deployment) {
    let now = chrono::Utc::now();
    println!(
        "#{}# {} resources in {}",
        "SUMMARY".on_blue(),
        now.format("%Y-%m-%d %H:%M:%S UTC"),
        d.resource_group
    );
    for (kind, value) in summary_rows(d) {
        println!("{},{}", format_field(kind, 16), format_field(value, 0));
    }
}
