//! Volume operations

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{OrderOutcome, Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Volume {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub region: String,
    /// Size in GB
    pub size: u32,
    #[serde(rename = "type")]
    pub volume_type: String,
    pub state: String,
    pub created: String,
    pub server_id: String,
}

pub struct VolumeService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> VolumeService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<Volume> {
        self.client.fetch("volume/info", Params::new().with_id(id)).await
    }

    pub async fn create(&self, params: Params) -> Result<OrderOutcome> {
        self.client
            .order("volume/create", params, TimingProfile::LONG)
            .await
    }

    pub async fn delete(&self, id: &str, profile: Option<TimingProfile>) -> Result<TaskStatus> {
        self.client
            .delete_task(
                "volume/delete",
                Params::new().with_id(id),
                profile.unwrap_or(TimingProfile::MEDIUM),
            )
            .await
    }

    /// Grow a volume to `size_gb`; billable
    pub async fn resize(
        &self,
        id: &str,
        size_gb: u32,
        profile: Option<TimingProfile>,
    ) -> Result<OrderOutcome> {
        self.client
            .order(
                "volume/resize",
                Params::new().with_id(id).with("size", size_gb),
                profile.unwrap_or(TimingProfile::LONG),
            )
            .await
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<()> {
        self.client
            .post("volume/rename", Params::new().with_id(id).with("name", name))
            .await?;
        Ok(())
    }

    pub async fn attach(&self, id: &str, server_id: &str) -> Result<String> {
        self.client
            .post(
                "volume/attach",
                Params::new().with_id(id).with("server_id", server_id),
            )
            .await
    }

    pub async fn detach(&self, id: &str) -> Result<String> {
        self.client
            .post("volume/detach", Params::new().with_id(id))
            .await
    }
}
