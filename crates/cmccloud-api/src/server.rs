//! Server operations

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{OrderOutcome, Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Serialize};

/// Network interface attached to a server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Nic {
    #[serde(rename = "uuid")]
    pub id: String,
    pub ip4_address: String,
    pub ip6_address: Option<serde_json::Value>,
    pub netmask: String,
    pub gateway: String,
    pub mac_address: String,
    pub default_nic: bool,
    pub is_vpc: bool,
    pub is_private: bool,
    pub ip_type: String,
    pub network_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Server {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub created: String,
    pub bits: u32,
    #[serde(rename = "zonename")]
    pub region_name: String,
    #[serde(rename = "zoneid")]
    pub region_id: String,
    pub state: String,
    pub main_ip_address: String,
    pub image_name: String,
    #[serde(rename = "image_uuid")]
    pub image_id: String,
    pub image_type: String,
    pub cpu: u32,
    #[serde(rename = "ram_size")]
    pub ram: u32,
    #[serde(rename = "root_size")]
    pub root: u32,
    pub gpu: u32,
    #[serde(rename = "autobackup")]
    pub auto_backup: bool,
    pub backup_schedule: String,
    pub nics: Vec<Nic>,
    pub datadisks: Vec<serde_json::Value>,
    pub total_datadisk_size: u32,
    pub jobs: Vec<serde_json::Value>,
    pub demo: bool,
}

/// New flavor for [`ServerService::resize`], sizes in GB
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Flavor {
    pub cpu: u32,
    pub ram_gb: u32,
    pub root_gb: u32,
    pub gpu: u32,
}

#[derive(Debug, Deserialize)]
struct Console {
    #[serde(default)]
    url: String,
}

pub struct ServerService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> ServerService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<Server> {
        self.client.fetch("server/info", Params::new().with_id(id)).await
    }

    /// Order a new server; `params` are passed through to the provider
    pub async fn create(&self, params: Params) -> Result<OrderOutcome> {
        self.client
            .order("server/create", params, TimingProfile::LONG)
            .await
    }

    pub async fn delete(&self, id: &str, profile: Option<TimingProfile>) -> Result<TaskStatus> {
        self.client
            .delete_task(
                "server_action/delete",
                Params::new().with_id(id),
                profile.unwrap_or(TimingProfile::LONG),
            )
            .await
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<String> {
        self.client
            .post("server_action/rename", Params::new().with_id(id).with("name", name))
            .await
    }

    pub async fn update_schedule_time(
        &self,
        id: &str,
        interval_type: &str,
        schedule_time: &str,
    ) -> Result<String> {
        let params = Params::new()
            .with_id(id)
            .with("interval_type", interval_type)
            .with("schedule_time", schedule_time);
        self.client
            .post("server_action/update_schedule_time", params)
            .await
    }

    pub async fn add_secondary_ip(&self, id: &str) -> Result<OrderOutcome> {
        self.client
            .order(
                "server_action/add_secondary_ip",
                Params::new().with_id(id),
                TimingProfile::MEDIUM,
            )
            .await
    }

    pub async fn remove_secondary_ip(&self, id: &str, ip4_address: &str) -> Result<TaskStatus> {
        self.client
            .task(
                "server_action/remove_secondary_ip",
                Params::new().with_id(id).with("ip4_address", ip4_address),
                TimingProfile::MEDIUM,
            )
            .await
    }

    pub async fn add_nic(&self, id: &str, network_id: &str) -> Result<TaskStatus> {
        self.client
            .task(
                "server_action/add_nic",
                Params::new().with_id(id).with("network_id", network_id),
                TimingProfile::MEDIUM,
            )
            .await
    }

    pub async fn remove_nic(&self, id: &str, nic_id: &str) -> Result<TaskStatus> {
        self.client
            .task(
                "server_action/remove_nic",
                Params::new().with_id(id).with("nic_id", nic_id),
                TimingProfile::MEDIUM,
            )
            .await
    }

    /// Turn on scheduled backups; billable
    pub async fn enable_backup(
        &self,
        id: &str,
        interval_type: &str,
        schedule_time: &str,
    ) -> Result<OrderOutcome> {
        let params = Params::new()
            .with_id(id)
            .with("interval_type", interval_type)
            .with("schedule_time", schedule_time);
        self.client
            .order("server_action/enable_backup", params, TimingProfile::SHORT)
            .await
    }

    pub async fn disable_backup(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .task("server_action/disable_backup", Params::new().with_id(id), TimingProfile::SHORT)
            .await
    }

    pub async fn enable_private_network(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .task(
                "server_action/enable_private_network",
                Params::new().with_id(id),
                TimingProfile::MEDIUM,
            )
            .await
    }

    pub async fn disable_private_network(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .task(
                "server_action/disable_private_network",
                Params::new().with_id(id),
                TimingProfile::MEDIUM,
            )
            .await
    }

    pub async fn reset_password(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .task("server_action/reset_pass", Params::new().with_id(id), TimingProfile::MEDIUM)
            .await
    }

    pub async fn start(&self, id: &str, profile: Option<TimingProfile>) -> Result<TaskStatus> {
        self.power("server_action/start", id, profile).await
    }

    pub async fn stop(&self, id: &str, profile: Option<TimingProfile>) -> Result<TaskStatus> {
        self.power("server_action/stop", id, profile).await
    }

    pub async fn restart(&self, id: &str, profile: Option<TimingProfile>) -> Result<TaskStatus> {
        self.power("server_action/restart", id, profile).await
    }

    async fn power(
        &self,
        action: &str,
        id: &str,
        profile: Option<TimingProfile>,
    ) -> Result<TaskStatus> {
        self.client
            .task(
                action,
                Params::new().with_id(id),
                profile.unwrap_or(TimingProfile::LONG),
            )
            .await
    }

    pub async fn restore_snapshot(&self, id: &str, snapshot_id: &str) -> Result<TaskStatus> {
        self.client
            .task(
                "server_action/restore_snapshot",
                Params::new().with_id(id).with("snapshot_id", snapshot_id),
                TimingProfile::SUPER_LONG,
            )
            .await
    }

    pub async fn take_snapshot(
        &self,
        id: &str,
        name: &str,
        profile: Option<TimingProfile>,
    ) -> Result<OrderOutcome> {
        self.client
            .order(
                "server_action/take_snapshot",
                Params::new().with_id(id).with("name", name),
                profile.unwrap_or(TimingProfile::HALF_DAY),
            )
            .await
    }

    pub async fn resize(
        &self,
        id: &str,
        flavor: Flavor,
        profile: Option<TimingProfile>,
    ) -> Result<OrderOutcome> {
        let params = Params::new()
            .with_id(id)
            .with("cpu", flavor.cpu)
            .with("ram", flavor.ram_gb)
            .with("disk", flavor.root_gb)
            .with("gpu", flavor.gpu);
        self.client
            .order(
                "server_action/resize",
                params,
                profile.unwrap_or(TimingProfile::LONG),
            )
            .await
    }

    /// URL of the server's web console
    pub async fn console_url(&self, id: &str) -> Result<String> {
        let console: Console = self
            .client
            .fetch("server_action/console", Params::new().with_id(id))
            .await?;
        Ok(console.url)
    }
}
