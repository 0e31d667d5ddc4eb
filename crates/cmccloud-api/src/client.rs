//! CMC Cloud API client
//!
//! [`CmcClient`] owns a [`TaskRunner`] over an injected [`Transport`] and
//! hands out one service per resource kind. Services borrow the client,
//! so a single client (and its connection pool) backs every call.

use crate::config::ApiConfig;
use crate::error::{ApiError, Result};
use crate::firewall_direct::FirewallDirectService;
use crate::firewall_vpc::FirewallVpcService;
use crate::floating_ip::FloatingIpService;
use crate::http::HttpTransport;
use crate::image::ImageService;
use crate::server::ServerService;
use crate::snapshot::SnapshotService;
use crate::task::TaskService;
use crate::volume::VolumeService;
use crate::vpc::VpcService;
use cmccloud_task::{
    ApiRequest, CancellationToken, OrderOutcome, Params, TaskRunner, TaskStatus, TimingProfile,
    Transport,
};
use serde::de::DeserializeOwned;

pub struct CmcClient<T = HttpTransport> {
    runner: TaskRunner<T>,
}

impl CmcClient<HttpTransport> {
    pub fn new(config: ApiConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    /// Client configured from `CMC_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ApiConfig::from_env()?)
    }
}

impl<T: Transport> CmcClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            runner: TaskRunner::new(transport),
        }
    }

    /// Abort in-flight waits when `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.runner = self.runner.with_cancellation(token);
        self
    }

    pub fn runner(&self) -> &TaskRunner<T> {
        &self.runner
    }

    pub fn servers(&self) -> ServerService<'_, T> {
        ServerService::new(self)
    }

    pub fn volumes(&self) -> VolumeService<'_, T> {
        VolumeService::new(self)
    }

    pub fn snapshots(&self) -> SnapshotService<'_, T> {
        SnapshotService::new(self)
    }

    pub fn vpcs(&self) -> VpcService<'_, T> {
        VpcService::new(self)
    }

    pub fn floating_ips(&self) -> FloatingIpService<'_, T> {
        FloatingIpService::new(self)
    }

    pub fn direct_firewalls(&self) -> FirewallDirectService<'_, T> {
        FirewallDirectService::new(self)
    }

    pub fn vpc_firewalls(&self) -> FirewallVpcService<'_, T> {
        FirewallVpcService::new(self)
    }

    pub fn images(&self) -> ImageService<'_, T> {
        ImageService::new(self)
    }

    pub fn tasks(&self) -> TaskService<'_, T> {
        TaskService::new(self)
    }

    /// Send one request and return the classified body
    pub(crate) async fn call(&self, request: ApiRequest) -> Result<String> {
        self.runner
            .call(&request)
            .await
            .map_err(|e| ApiError::Task(e.in_action(&request.action, &request.params)))
    }

    /// GET an action and decode its body
    pub(crate) async fn fetch<R: DeserializeOwned>(
        &self,
        action: &str,
        params: Params,
    ) -> Result<R> {
        let body = self.call(ApiRequest::get(action, params)).await?;
        serde_json::from_str(&body).map_err(|e| ApiError::decode(action, e))
    }

    /// POST an action whose response is not a task
    pub(crate) async fn post(&self, action: &str, params: Params) -> Result<String> {
        self.call(ApiRequest::post(action, params)).await
    }

    /// POST an action and wait for the task it starts
    pub(crate) async fn task(
        &self,
        action: &str,
        params: Params,
        profile: TimingProfile,
    ) -> Result<TaskStatus> {
        Ok(self
            .runner
            .run_task(ApiRequest::post(action, params), profile)
            .await?)
    }

    /// DELETE a resource and wait for the task it starts
    pub(crate) async fn delete_task(
        &self,
        action: &str,
        params: Params,
        profile: TimingProfile,
    ) -> Result<TaskStatus> {
        Ok(self
            .runner
            .run_task(ApiRequest::delete(action, params), profile)
            .await?)
    }

    /// POST a billable action, require payment, and wait for its task
    pub(crate) async fn order(
        &self,
        action: &str,
        params: Params,
        profile: TimingProfile,
    ) -> Result<OrderOutcome> {
        Ok(self
            .runner
            .run_order(ApiRequest::post(action, params), profile)
            .await?)
    }
}
