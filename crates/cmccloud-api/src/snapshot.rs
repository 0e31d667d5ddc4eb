//! Snapshot operations

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{OrderOutcome, Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub size: u32,
    pub state: String,
    pub created: String,
    pub volume_id: String,
    pub server_id: String,
}

pub struct SnapshotService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> SnapshotService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<Snapshot> {
        self.client.fetch("snapshot/info", Params::new().with_id(id)).await
    }

    /// Snapshot a volume; billable and slow
    pub async fn create(&self, volume_id: &str, name: &str) -> Result<OrderOutcome> {
        self.client
            .order(
                "snapshot/create",
                Params::new().with("volume_id", volume_id).with("name", name),
                TimingProfile::HALF_DAY,
            )
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .delete_task("snapshot/delete", Params::new().with_id(id), TimingProfile::MEDIUM)
            .await
    }

    pub async fn rename(&self, id: &str, name: &str) -> Result<()> {
        self.client
            .post("snapshot/rename", Params::new().with_id(id).with("name", name))
            .await?;
        Ok(())
    }
}
