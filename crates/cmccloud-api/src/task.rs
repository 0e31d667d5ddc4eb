//! Direct task lookups

use crate::client::CmcClient;
use crate::error::Result;
use cmccloud_task::{Params, TASK_STATUS_ACTION, TaskHandle, TaskStatus, TimingProfile, Transport};

pub struct TaskService<'a, T> {
    client: &'a CmcClient<T>,
}

impl<'a, T: Transport> TaskService<'a, T> {
    pub(crate) fn new(client: &'a CmcClient<T>) -> Self {
        Self { client }
    }

    /// Current status of a task, without waiting
    pub async fn get(&self, id: &str) -> Result<TaskStatus> {
        self.client
            .fetch(TASK_STATUS_ACTION, Params::new().with_id(id))
            .await
    }

    /// Wait for a task started elsewhere to reach `DONE`
    pub async fn wait(&self, id: &str, profile: TimingProfile) -> Result<TaskStatus> {
        Ok(self
            .client
            .runner()
            .wait_for_task(&TaskHandle::new(id), profile)
            .await?)
    }
}
