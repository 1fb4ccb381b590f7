//! Autoscale rules and settings (`microsoft.insights/autoscaleSettings`).

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOperator {
    Equals,
    NotEquals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleDirection {
    Increase,
    Decrease,
}

impl fmt::Display for ComparisonOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for ScaleDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

/// ISO 8601 durations controlling metric sampling and scale cooldown.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleTiming {
    pub time_grain: String,
    pub time_window: String,
    pub cool_down: String,
}

impl Default for RuleTiming {
    fn default() -> Self {
        RuleTiming {
            time_grain: "PT1M".to_string(),
            time_window: "PT5M".to_string(),
            cool_down: "PT1M".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MetricTrigger {
    pub metric_name: String,
    #[serde(default)]
    pub metric_namespace: String,
    pub metric_resource_uri: String,
    pub time_grain: String,
    pub statistic: String,
    pub time_window: String,
    pub time_aggregation: String,
    pub operator: ComparisonOperator,
    pub threshold: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScaleAction {
    pub direction: ScaleDirection,
    #[serde(rename = "type")]
    pub action_type: String,
    /// Instance count change; ARM wants it as a string.
    pub value: String,
    pub cooldown: String,
}

/// One metric threshold -> scale action rule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleRule {
    pub metric_trigger: MetricTrigger,
    pub scale_action: ScaleAction,
}

impl AutoscaleRule {
    /// Average of `metric_name` over the window compared to `threshold`;
    /// when it fires, change capacity by `change_count` in `direction`.
    pub fn new(
        metric_resource_uri: &str,
        metric_name: &str,
        operator: ComparisonOperator,
        threshold: f64,
        direction: ScaleDirection,
        change_count: u32,
        timing: &RuleTiming,
    ) -> AutoscaleRule {
        AutoscaleRule {
            metric_trigger: MetricTrigger {
                metric_name: metric_name.to_string(),
                metric_namespace: String::new(),
                metric_resource_uri: metric_resource_uri.to_string(),
                time_grain: timing.time_grain.clone(),
                statistic: "Average".to_string(),
                time_window: timing.time_window.clone(),
                time_aggregation: "Average".to_string(),
                operator,
                threshold,
            },
            scale_action: ScaleAction {
                direction,
                action_type: "ChangeCount".to_string(),
                value: change_count.to_string(),
                cooldown: timing.cool_down.clone(),
            },
        }
    }
}

impl fmt::Display for AutoscaleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} -> {} by {}",
            self.metric_trigger.metric_name,
            self.metric_trigger.operator,
            self.metric_trigger.threshold,
            self.scale_action.direction,
            self.scale_action.value
        )
    }
}

/// Instance count bounds; ARM wants the numbers as strings.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ScaleCapacity {
    pub minimum: String,
    pub maximum: String,
    pub default: String,
}

impl ScaleCapacity {
    pub fn new(minimum: u32, maximum: u32, default: u32) -> Result<ScaleCapacity, String> {
        if minimum > maximum || default < minimum || default > maximum {
            return Err(format!(
                "Invalid autoscale capacity: min={minimum} max={maximum} default={default}"
            ));
        }
        Ok(ScaleCapacity {
            minimum: minimum.to_string(),
            maximum: maximum.to_string(),
            default: default.to_string(),
        })
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AutoscaleProfile {
    pub name: String,
    pub capacity: ScaleCapacity,
    pub rules: Vec<AutoscaleRule>,
}

/// Profile name used for the single profile the workflow creates.
pub const DEFAULT_PROFILE_NAME: &str = "Auto created scale condition";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EmailNotification {
    pub send_to_subscription_administrator: bool,
    pub send_to_subscription_co_administrators: bool,
    pub custom_emails: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AutoscaleNotification {
    pub operation: String,
    pub email: EmailNotification,
}

impl AutoscaleNotification {
    /// Email subscription admins, co-admins and `email` on every scale operation.
    pub fn email(email: &str) -> AutoscaleNotification {
        AutoscaleNotification {
            operation: "Scale".to_string(),
            email: EmailNotification {
                send_to_subscription_administrator: true,
                send_to_subscription_co_administrators: true,
                custom_emails: vec![email.to_string()],
            },
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AutoscaleSettingProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub profiles: Vec<AutoscaleProfile>,
    pub enabled: bool,
    pub target_resource_uri: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notifications: Vec<AutoscaleNotification>,
}

/// `PUT .../microsoft.insights/autoscaleSettings/{name}` body.
#[derive(Serialize, Debug, Clone)]
pub struct AutoscaleSetting {
    pub location: String,
    pub properties: AutoscaleSettingProperties,
}

impl AutoscaleSetting {
    /// Enabled setting with one profile targeting `target_resource_uri`.
    pub fn new(
        setting_name: &str,
        location: &str,
        target_resource_uri: &str,
        capacity: ScaleCapacity,
        rules: Vec<AutoscaleRule>,
        notify: Option<&str>,
    ) -> AutoscaleSetting {
        AutoscaleSetting {
            location: location.to_string(),
            properties: AutoscaleSettingProperties {
                name: Some(setting_name.to_string()),
                profiles: vec![AutoscaleProfile {
                    name: DEFAULT_PROFILE_NAME.to_string(),
                    capacity,
                    rules,
                }],
                enabled: true,
                target_resource_uri: target_resource_uri.to_string(),
                notifications: notify.map(AutoscaleNotification::email).into_iter().collect(),
            },
        }
    }
}

/// An autoscale setting as returned by ARM.
#[derive(Deserialize, Debug, Clone)]
pub struct AutoscaleSettingResource {
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    pub properties: AutoscaleSettingProperties,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct AutoscaleSettingList {
    #[serde(default)]
    pub value: Vec<AutoscaleSettingResource>,
}
