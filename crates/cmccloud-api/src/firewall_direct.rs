//! Direct firewall operations
//!
//! A direct firewall is keyed by server and public IP rather than by its own
//! id. Rule sets are sent as the provider's JSON-encoded strings.

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallDirectRule {
    pub id: i64,
    pub name: String,
    pub protocol: String,
    pub src: String,
    pub dst: String,
    pub port_range: String,
    pub action: String,
    pub port_type: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FirewallDirect {
    pub server_id: String,
    pub ip_address: String,
    pub inbound_rules: Vec<FirewallDirectRule>,
    pub outbound_rules: Vec<FirewallDirectRule>,
}

pub struct FirewallDirectService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> FirewallDirectService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, server_id: &str, ip_address: &str) -> Result<FirewallDirect> {
        self.client
            .fetch(
                "firewall_direct/info",
                Params::new()
                    .with("server_id", server_id)
                    .with("ip_address", ip_address),
            )
            .await
    }

    pub async fn delete(&self, server_id: &str, ip_address: &str) -> Result<TaskStatus> {
        self.client
            .delete_task(
                "firewall_direct/delete",
                Params::new().with_id(server_id).with("ip_address", ip_address),
                TimingProfile::MEDIUM,
            )
            .await
    }

    /// Replace both rule sets of the firewall
    pub async fn save_rules(
        &self,
        server_id: &str,
        ip_address: &str,
        inbound_rules: &str,
        outbound_rules: &str,
    ) -> Result<TaskStatus> {
        let params = Params::new()
            .with("server_id", server_id)
            .with("ip_address", ip_address)
            .with("inbound_rules", inbound_rules)
            .with("outbound_rules", outbound_rules);
        self.client
            .task("firewall_direct/save_rules", params, TimingProfile::MEDIUM)
            .await
    }
}
