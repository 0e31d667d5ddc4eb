//! Poll-until-target-state engine
//!
//! [`wait_for_state`] drives a [`Refresh`] value until it reports a target
//! state, a failure state, an unexpected state or an error, or until the
//! [`TimingProfile`] budget runs out. Sleeps are tokio timers and race a
//! [`CancellationToken`], so a waiting run never blocks its worker thread and
//! can be aborted from outside.

use crate::error::{Result, TaskError};
use crate::timing::TimingProfile;
use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tokio_util::sync::CancellationToken;

/// One refresh result: the reported state and the value to hand back if the
/// state is a target
#[derive(Debug, Clone, PartialEq)]
pub struct Observation<T> {
    pub state: String,
    pub value: T,
    /// Free-form context used in failure messages
    pub detail: Option<String>,
}

impl<T> Observation<T> {
    pub fn new(state: impl Into<String>, value: T) -> Self {
        Self {
            state: state.into(),
            value,
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

/// Source of observations for a poll run
///
/// An `Err` from [`Refresh::refresh`] aborts the run immediately; retries
/// belong to the transport.
#[async_trait]
pub trait Refresh: Send {
    type Output: Send;

    async fn refresh(&mut self) -> Result<Observation<Self::Output>>;
}

/// What to do with a state that is neither pending, target nor failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownStatePolicy {
    /// Abort with [`TaskError::UnexpectedState`]
    #[default]
    Fail,
    /// Log a warning and keep polling
    Continue,
}

/// State roles for one poll run
#[derive(Debug, Clone, Default)]
pub struct StateSets {
    pub pending: HashSet<String>,
    pub target: HashSet<String>,
    pub failure: HashSet<String>,
    pub unknown: UnknownStatePolicy,
}

impl StateSets {
    pub fn new<P, T>(pending: P, target: T) -> Self
    where
        P: IntoIterator,
        P::Item: Into<String>,
        T: IntoIterator,
        T::Item: Into<String>,
    {
        Self {
            pending: pending.into_iter().map(Into::into).collect(),
            target: target.into_iter().map(Into::into).collect(),
            failure: HashSet::new(),
            unknown: UnknownStatePolicy::Fail,
        }
    }

    pub fn with_failure<F>(mut self, failure: F) -> Self
    where
        F: IntoIterator,
        F::Item: Into<String>,
    {
        self.failure = failure.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_unknown_policy(mut self, policy: UnknownStatePolicy) -> Self {
        self.unknown = policy;
        self
    }

    /// Provider task lifecycle: `WAIT`/`PROCESSING` until `DONE`, `ERROR` fails
    pub fn task() -> Self {
        use crate::task::states::{DONE, ERROR, PROCESSING, WAIT};
        Self::new([WAIT, PROCESSING], [DONE]).with_failure([ERROR])
    }

    fn assess<T>(&self, observation: Observation<T>) -> PollOutcome<T> {
        let Observation {
            state,
            value,
            detail,
        } = observation;

        if self.target.contains(&state) {
            return PollOutcome::Done(value);
        }
        if self.pending.contains(&state) {
            return PollOutcome::Continue;
        }
        if self.failure.contains(&state) {
            return PollOutcome::Failed(TaskError::TaskFailed {
                state,
                detail: detail.unwrap_or_default(),
            });
        }
        match self.unknown {
            UnknownStatePolicy::Fail => PollOutcome::Failed(TaskError::UnexpectedState { state }),
            UnknownStatePolicy::Continue => {
                tracing::warn!(state = %state, "Unrecognised state, continuing to poll");
                PollOutcome::Continue
            }
        }
    }
}

enum PollOutcome<T> {
    Continue,
    Done(T),
    Failed(TaskError),
}

/// Poll `refresh` until it reaches a target state
///
/// The run sleeps `initial_delay`, then refreshes every `poll_interval`.
/// Before each sleep the elapsed time since the run started is checked: if
/// the sleep would carry it past `timeout` the run ends with
/// [`TaskError::Timeout`] instead.
pub async fn wait_for_state<R: Refresh>(
    refresh: &mut R,
    states: &StateSets,
    profile: TimingProfile,
    cancel: &CancellationToken,
) -> Result<R::Output> {
    let started = Instant::now();
    let mut last_state: Option<String> = None;
    let mut attempt: u32 = 0;

    suspend(started, profile.initial_delay, &profile, &last_state, cancel).await?;

    loop {
        if cancel.is_cancelled() {
            return Err(TaskError::Cancelled);
        }

        attempt += 1;
        let observation = refresh.refresh().await?;
        tracing::debug!(attempt, state = %observation.state, "Poll observation");
        last_state = Some(observation.state.clone());

        match states.assess(observation) {
            PollOutcome::Done(value) => return Ok(value),
            PollOutcome::Failed(err) => return Err(err),
            PollOutcome::Continue => {}
        }

        suspend(started, profile.poll_interval, &profile, &last_state, cancel).await?;
    }
}

async fn suspend(
    started: Instant,
    wait: Duration,
    profile: &TimingProfile,
    last_state: &Option<String>,
    cancel: &CancellationToken,
) -> Result<()> {
    let elapsed = started.elapsed();
    if elapsed + wait > profile.timeout {
        return Err(TaskError::Timeout {
            elapsed,
            last_state: last_state.clone(),
        });
    }
    if wait.is_zero() {
        tokio::task::yield_now().await;
        return Ok(());
    }

    tokio::select! {
        _ = cancel.cancelled() => Err(TaskError::Cancelled),
        _ = sleep(wait) => Ok(()),
    }
}
