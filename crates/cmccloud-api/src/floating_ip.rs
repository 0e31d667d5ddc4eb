//! Floating IP operations

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{OrderOutcome, Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FloatingIp {
    pub id: String,
    #[serde(rename = "ipaddress")]
    pub ip_address: String,
    #[serde(rename = "zonename")]
    pub region_name: String,
    #[serde(rename = "issourcenat")]
    pub is_source_nat: bool,
    #[serde(rename = "isstaticnat")]
    pub is_static_nat: bool,
    #[serde(rename = "associatednetworkid")]
    pub associated_network_id: String,
    #[serde(rename = "associatednetworkname")]
    pub associated_network_name: String,
    #[serde(rename = "networkid")]
    pub network_id: String,
    pub state: String,
    #[serde(rename = "vpcid")]
    pub vpc_id: String,
}

pub struct FloatingIpService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> FloatingIpService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<FloatingIp> {
        self.client
            .fetch("floatingip/info", Params::new().with_id(id))
            .await
    }

    pub async fn create(&self, vpc_id: &str) -> Result<OrderOutcome> {
        self.client
            .order(
                "floatingip/create",
                Params::new().with("vpc_id", vpc_id),
                TimingProfile::MEDIUM,
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .delete_task("floatingip/delete", Params::new().with_id(id), TimingProfile::SHORT)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floating_ip_field_names() {
        let ip: FloatingIp = serde_json::from_str(
            r#"{"id": "f-1", "ipaddress": "203.0.113.7", "isstaticnat": true, "vpcid": "vpc-1"}"#,
        )
        .unwrap();

        assert_eq!(ip.ip_address, "203.0.113.7");
        assert!(ip.is_static_nat);
        assert!(!ip.is_source_nat);
        assert_eq!(ip.vpc_id, "vpc-1");
    }
}
