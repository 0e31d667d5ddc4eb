//! The seam between orchestration and the HTTP layer

use crate::outcome::RawResponse;
use crate::request::{ApiRequest, Params};
use crate::task::TaskHandle;
use async_trait::async_trait;
use std::sync::Arc;

/// Action queried to read task status
pub const TASK_STATUS_ACTION: &str = "task/info";

/// Sends provider calls and reports what came back
///
/// Implementations never fail: every failure mode is described by the
/// returned [`RawResponse`] and sorted out by [`classify`](crate::classify).
/// A transport is shared by concurrent orchestrations and must be safe for
/// concurrent use.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request
    async fn send(&self, request: &ApiRequest) -> RawResponse;

    /// Read the current status of a task
    async fn query_task_status(&self, task: &TaskHandle) -> RawResponse {
        let request = ApiRequest::get(TASK_STATUS_ACTION, Params::new().with("id", task.as_str()));
        self.send(&request).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for &T {
    async fn send(&self, request: &ApiRequest) -> RawResponse {
        (**self).send(request).await
    }

    async fn query_task_status(&self, task: &TaskHandle) -> RawResponse {
        (**self).query_task_status(task).await
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: &ApiRequest) -> RawResponse {
        (**self).send(request).await
    }

    async fn query_task_status(&self, task: &TaskHandle) -> RawResponse {
        (**self).query_task_status(task).await
    }
}
