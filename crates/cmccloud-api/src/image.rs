//! Server image templates

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{Params, Transport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Image {
    #[serde(rename = "uuid")]
    pub id: String,
    pub name: String,
    pub bits: u32,
}

pub struct ImageService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> ImageService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    /// Templates available for new servers
    pub async fn list(&self) -> Result<Vec<Image>> {
        self.client.fetch("server/templates", Params::new()).await
    }
}
