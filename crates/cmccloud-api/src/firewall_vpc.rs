//! VPC firewall operations

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::task::deserialize_task_id;
use cmccloud_task::{Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Deserializer, Serialize};

const DELETE_RULE_ACTION: &str = "firewall_vpc/delete_rule";

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallVpcRule {
    #[serde(deserialize_with = "deserialize_task_id")]
    pub id: String,
    pub number: Option<i64>,
    #[serde(rename = "type")]
    pub rule_type: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub protocol: String,
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cidrs: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub port_range: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallVpc {
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub vpc_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub inbound_rules: Vec<FirewallVpcRule>,
    #[serde(deserialize_with = "null_as_default")]
    pub outbound_rules: Vec<FirewallVpcRule>,
}

/// One rule to create or update; `cidrs` is comma separated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleSpec<'a> {
    pub number: i64,
    pub cidrs: &'a str,
    pub action: &'a str,
    pub protocol: &'a str,
    pub rule_type: &'a str,
    pub port_range: &'a str,
}

impl RuleSpec<'_> {
    fn apply(&self, params: Params) -> Params {
        params
            .with("number", self.number)
            .with("cidrs", self.cidrs)
            .with("action", self.action)
            .with("protocol", self.protocol)
            .with("type", self.rule_type)
            .with("port_range", self.port_range)
    }
}

/// The part of a listed rule that a bulk delete needs
#[derive(Deserialize)]
struct RuleRef {
    #[serde(default, deserialize_with = "deserialize_task_id")]
    id: String,
}

pub struct FirewallVpcService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> FirewallVpcService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<FirewallVpc> {
        self.client
            .fetch("firewall_vpc/info", Params::new().with_id(id))
            .await
    }

    pub async fn create(&self, vpc_id: &str, name: &str, description: &str) -> Result<TaskStatus> {
        let params = Params::new()
            .with("name", name)
            .with("description", description)
            .with("vpc_id", vpc_id);
        self.client
            .task("firewall_vpc/create", params, TimingProfile::SHORT)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .delete_task("firewall_vpc/delete", Params::new().with_id(id), TimingProfile::MEDIUM)
            .await
    }

    pub async fn update(&self, id: &str, name: &str, description: &str) -> Result<TaskStatus> {
        let params = Params::new()
            .with_id(id)
            .with("name", name)
            .with("description", description);
        self.client
            .task("firewall_vpc/update", params, TimingProfile::SHORT)
            .await
    }

    /// Add a rule to firewall `id`
    pub async fn create_rule(&self, id: &str, rule: &RuleSpec<'_>) -> Result<TaskStatus> {
        self.client
            .task(
                "firewall_vpc/create_rule",
                rule.apply(Params::new().with_id(id)),
                TimingProfile::SHORT,
            )
            .await
    }

    /// Replace rule `rule_id`
    pub async fn update_rule(&self, rule_id: &str, rule: &RuleSpec<'_>) -> Result<TaskStatus> {
        let params = Params::new().with_id(rule_id).with("rule_id", rule_id);
        self.client
            .task("firewall_vpc/update_rule", rule.apply(params), TimingProfile::SHORT)
            .await
    }

    pub async fn rules(&self, id: &str) -> Result<Vec<FirewallVpcRule>> {
        self.client
            .fetch("firewall_vpc/get_rules", Params::new().with_id(id))
            .await
    }

    /// Check rule sets without saving them; returns the provider's complaints
    pub async fn validate_rules(
        &self,
        inbound_rules: &str,
        outbound_rules: &str,
    ) -> Result<Vec<String>> {
        let params = Params::new()
            .with("inbound_rules", inbound_rules)
            .with("outbound_rules", outbound_rules);
        let body = self.client.post("firewall_vpc/validate_rules", params).await?;
        serde_json::from_str(&body)
            .map_err(|e| crate::error::ApiError::decode("firewall_vpc/validate_rules", e))
    }

    pub async fn save_rules(
        &self,
        id: &str,
        inbound_rules: &str,
        outbound_rules: &str,
    ) -> Result<TaskStatus> {
        let params = Params::new()
            .with_id(id)
            .with("inbound_rules", inbound_rules)
            .with("outbound_rules", outbound_rules);
        self.client
            .task("firewall_vpc/save_rules", params, TimingProfile::MEDIUM)
            .await
    }

    /// Delete every rule of firewall `id`, one delete task per rule
    ///
    /// Stops at the first rejected delete; rules deleted before it stay
    /// deleted.
    pub async fn delete_all_rules(
        &self,
        id: &str,
        profile: Option<TimingProfile>,
    ) -> Result<Vec<TaskStatus>> {
        let rules: Vec<RuleRef> = self
            .client
            .fetch("firewall_vpc/get_rules", Params::new().with_id(id))
            .await?;
        let ids: Vec<String> = rules
            .into_iter()
            .filter_map(|rule| {
                if rule.id.is_empty() {
                    tracing::warn!(firewall_id = id, "Skipping firewall rule without an id");
                    None
                } else {
                    Some(rule.id)
                }
            })
            .collect();

        tracing::info!(firewall_id = id, rules = ids.len(), "Deleting all firewall rules");

        Ok(self
            .client
            .runner()
            .run_bulk_delete(
                DELETE_RULE_ACTION,
                &ids,
                profile.unwrap_or(TimingProfile::SHORT),
            )
            .await?)
    }
}
