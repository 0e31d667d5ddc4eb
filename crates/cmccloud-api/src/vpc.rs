//! VPC operations

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{OrderOutcome, Params, TaskStatus, TimingProfile, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vpc {
    pub id: String,
    pub name: String,
    pub state: String,
    #[serde(rename = "zonename")]
    pub region_name: String,
    pub cidr: String,
    pub description: String,
}

/// Parameters of a new VPC
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVpc<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub region: &'a str,
    pub cidr: &'a str,
}

pub struct VpcService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> VpcService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    pub async fn get(&self, id: &str) -> Result<Vpc> {
        self.client.fetch("vpc/info", Params::new().with_id(id)).await
    }

    pub async fn create(&self, vpc: NewVpc<'_>) -> Result<OrderOutcome> {
        let params = Params::new()
            .with("name", vpc.name)
            .with("description", vpc.description)
            .with("region", vpc.region)
            .with("cidr", vpc.cidr);
        self.client
            .order("vpc/create", params, TimingProfile::SHORT)
            .await
    }

    pub async fn delete(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .delete_task("vpc/delete", Params::new().with_id(id), TimingProfile::MEDIUM)
            .await
    }

    pub async fn update(&self, id: &str, name: &str, description: &str) -> Result<TaskStatus> {
        let params = Params::new()
            .with_id(id)
            .with("name", name)
            .with("description", description);
        self.client
            .task("vpc/update", params, TimingProfile::SHORT)
            .await
    }
}
