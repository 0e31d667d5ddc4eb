//! Submit-then-poll orchestration
//!
//! [`TaskRunner`] composes a [`Transport`] call, [`classify`] and
//! [`wait_for_state`] into the three shapes the provider uses:
//!
//! - plain tasks: submit, read `jobid`, poll until `DONE`
//! - orders: submit, require `paid`, then poll
//! - bulk deletes: submit one delete per id, then poll every task

use crate::error::{Result, TaskError};
use crate::outcome::classify;
use crate::poller::{Observation, Refresh, StateSets, wait_for_state};
use crate::request::{ApiRequest, Params};
use crate::task::{OrderOutcome, OrderResult, TaskHandle, TaskStatus};
use crate::timing::TimingProfile;
use crate::transport::Transport;
use async_trait::async_trait;
use futures_util::StreamExt;
use futures_util::stream;
use tokio_util::sync::CancellationToken;

const DEFAULT_BULK_CONCURRENCY: usize = 4;

/// Status query for one task, used as the poller's refresh source
pub struct TaskProbe<'a, T: ?Sized> {
    transport: &'a T,
    task: TaskHandle,
}

impl<'a, T: Transport + ?Sized> TaskProbe<'a, T> {
    pub fn new(transport: &'a T, task: TaskHandle) -> Self {
        Self { transport, task }
    }

    pub fn task(&self) -> &TaskHandle {
        &self.task
    }
}

#[async_trait]
impl<'a, T: Transport + ?Sized> Refresh for TaskProbe<'a, T> {
    type Output = TaskStatus;

    async fn refresh(&mut self) -> Result<Observation<TaskStatus>> {
        let response = self.transport.query_task_status(&self.task).await;
        let body = classify(&response).into_result()?;
        let status: TaskStatus = serde_json::from_str(&body)?;
        Ok(Observation::new(status.status.clone(), status).with_detail(body))
    }
}

/// Runs provider actions to completion over a shared transport
pub struct TaskRunner<T> {
    transport: T,
    states: StateSets,
    cancel: CancellationToken,
    bulk_concurrency: usize,
}

impl<T: Transport> TaskRunner<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            states: StateSets::task(),
            cancel: CancellationToken::new(),
            bulk_concurrency: DEFAULT_BULK_CONCURRENCY,
        }
    }

    /// Use `token` to abort waits from outside
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Maximum number of tasks polled at once by [`TaskRunner::run_bulk_delete`]
    pub fn with_bulk_concurrency(mut self, limit: usize) -> Self {
        self.bulk_concurrency = limit.max(1);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Send a request and classify the response, without waiting on any task
    pub async fn call(&self, request: &ApiRequest) -> Result<String> {
        tracing::debug!(request = %request, params = %request.params, "Sending request");
        let response = self.transport.send(request).await;
        classify(&response).into_result()
    }

    /// Submit an action and wait for its task to reach `DONE`
    pub async fn run_task(
        &self,
        request: ApiRequest,
        profile: TimingProfile,
    ) -> Result<TaskStatus> {
        self.run_task_with_states(request, &self.states, profile).await
    }

    /// Submit an action and wait for its task using custom state sets
    pub async fn run_task_with_states(
        &self,
        request: ApiRequest,
        states: &StateSets,
        profile: TimingProfile,
    ) -> Result<TaskStatus> {
        let in_action = |e: TaskError| e.in_action(&request.action, &request.params);

        let body = self.call(&request).await.map_err(in_action)?;
        let task = TaskHandle::from_submission(&request.action, &body).map_err(in_action)?;
        self.wait_with_states(&task, states, profile)
            .await
            .map_err(in_action)
    }

    /// Submit a billable action, require payment, then wait for its task
    ///
    /// An unpaid order never reaches `DONE`, so it fails with
    /// [`TaskError::UnpaidOrder`] without polling.
    pub async fn run_order(
        &self,
        request: ApiRequest,
        profile: TimingProfile,
    ) -> Result<OrderOutcome> {
        let body = self
            .call(&request)
            .await
            .map_err(|e| e.in_action(&request.action, &request.params))?;

        let order: OrderResult =
            serde_json::from_str(&body).map_err(|_| TaskError::MalformedSubmission {
                action: request.action.clone(),
                body: body.clone(),
            })?;

        if !order.paid {
            tracing::warn!(action = %request.action, price = order.price, "Order is not paid");
            return Err(TaskError::UnpaidOrder {
                action: request.action.clone(),
                params: request.params.to_string(),
                body,
            });
        }

        let task = order.task();
        if task.as_str().trim().is_empty() {
            return Err(TaskError::MalformedSubmission {
                action: request.action.clone(),
                body,
            });
        }

        let status = self
            .wait_for_task(&task, profile)
            .await
            .map_err(|e| TaskError::Task {
                action: request.action.clone(),
                task_id: task.to_string(),
                source: Box::new(e),
            })?;

        Ok(OrderOutcome { order, status })
    }

    /// Delete each id with its own call, then wait for every delete task
    ///
    /// Submissions are sequential and stop at the first failure. Polling runs
    /// with bounded concurrency; results are reduced in submission order, so
    /// the reported failure is the first failing task by submission order.
    pub async fn run_bulk_delete<S: AsRef<str>>(
        &self,
        action: &str,
        ids: &[S],
        profile: TimingProfile,
    ) -> Result<Vec<TaskStatus>> {
        let mut tasks = Vec::with_capacity(ids.len());
        for id in ids {
            let id = id.as_ref();
            let bulk_submit = |e: TaskError| TaskError::BulkSubmit {
                action: action.to_string(),
                id: id.to_string(),
                source: Box::new(e),
            };

            let request = ApiRequest::delete(action, Params::new().with("id", id));
            let body = self.call(&request).await.map_err(bulk_submit)?;
            let task = TaskHandle::from_submission(action, &body).map_err(bulk_submit)?;
            tracing::debug!(id, task_id = %task, "Delete submitted");
            tasks.push(task);
        }

        tracing::info!(action, count = tasks.len(), "Waiting for delete tasks");

        let mut results = stream::iter(tasks.iter().map(|task| async move {
            (task, self.wait_for_task(task, profile).await)
        }))
        .buffered(self.bulk_concurrency);

        let mut statuses = Vec::with_capacity(tasks.len());
        while let Some((task, result)) = results.next().await {
            match result {
                Ok(status) => statuses.push(status),
                Err(e) => {
                    return Err(TaskError::BulkPoll {
                        action: action.to_string(),
                        task_id: task.to_string(),
                        source: Box::new(e),
                    });
                }
            }
        }
        Ok(statuses)
    }

    /// Wait for an already-submitted task to reach `DONE`
    pub async fn wait_for_task(
        &self,
        task: &TaskHandle,
        profile: TimingProfile,
    ) -> Result<TaskStatus> {
        self.wait_with_states(task, &self.states, profile).await
    }

    async fn wait_with_states(
        &self,
        task: &TaskHandle,
        states: &StateSets,
        profile: TimingProfile,
    ) -> Result<TaskStatus> {
        tracing::info!(
            task_id = %task,
            timeout_secs = profile.timeout.as_secs(),
            "Waiting for task to finish"
        );
        let mut probe = TaskProbe::new(&self.transport, task.clone());
        let status = wait_for_state(&mut probe, states, profile, &self.cancel).await?;
        tracing::info!(task_id = %task, "Task finished");
        Ok(status)
    }
}
