//! Task orchestration error types

use std::time::Duration;
use thiserror::Error;

/// Where a provider-reported error was found in the response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorOrigin {
    /// Decoded by the transport from a non-2xx response
    Structured,
    /// Found inside a 2xx body that carried an error object
    Embedded,
}

/// Coarse classification of a [`TaskError`], independent of wrapping context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Transport,
    Api,
    UnpaidOrder,
    MalformedSubmission,
    UnexpectedState,
    TaskFailed,
    Timeout,
    Cancelled,
    InvalidTiming,
    Json,
}

/// Errors produced while submitting and waiting for provider tasks
#[derive(Error, Debug)]
pub enum TaskError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Error {code}: {text}")]
    Api {
        code: i64,
        text: String,
        origin: ApiErrorOrigin,
    },

    #[error("Order for {action} is not paid, params: {params}, response: {body}")]
    UnpaidOrder {
        action: String,
        params: String,
        body: String,
    },

    #[error("Response to {action} carries no task id: {body}")]
    MalformedSubmission { action: String, body: String },

    #[error("Unexpected task state: {state}")]
    UnexpectedState { state: String },

    #[error("Task failed with state {state}: {detail}")]
    TaskFailed { state: String, detail: String },

    #[error("Timeout after {elapsed:?} (last state: {})", .last_state.as_deref().unwrap_or("none"))]
    Timeout {
        elapsed: Duration,
        last_state: Option<String>,
    },

    #[error("Wait cancelled")]
    Cancelled,

    #[error("Invalid timing profile: {0}")]
    InvalidTiming(String),

    #[error("Error perform action {action}: {source}, params: {params}")]
    Action {
        action: String,
        params: String,
        #[source]
        source: Box<TaskError>,
    },

    #[error("Error perform action {action} with task id ({task_id}): {source}")]
    Task {
        action: String,
        task_id: String,
        #[source]
        source: Box<TaskError>,
    },

    #[error("Error when delete id {id} via {action}: {source}")]
    BulkSubmit {
        action: String,
        id: String,
        #[source]
        source: Box<TaskError>,
    },

    #[error("Error when delete via {action}, task id {task_id}: {source}")]
    BulkPoll {
        action: String,
        task_id: String,
        #[source]
        source: Box<TaskError>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TaskError {
    /// Kind of the innermost error, looking through context wrappers
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::Transport(_) => ErrorKind::Transport,
            TaskError::Api { .. } => ErrorKind::Api,
            TaskError::UnpaidOrder { .. } => ErrorKind::UnpaidOrder,
            TaskError::MalformedSubmission { .. } => ErrorKind::MalformedSubmission,
            TaskError::UnexpectedState { .. } => ErrorKind::UnexpectedState,
            TaskError::TaskFailed { .. } => ErrorKind::TaskFailed,
            TaskError::Timeout { .. } => ErrorKind::Timeout,
            TaskError::Cancelled => ErrorKind::Cancelled,
            TaskError::InvalidTiming(_) => ErrorKind::InvalidTiming,
            TaskError::Json(_) => ErrorKind::Json,
            TaskError::Action { source, .. }
            | TaskError::Task { source, .. }
            | TaskError::BulkSubmit { source, .. }
            | TaskError::BulkPoll { source, .. } => source.kind(),
        }
    }

    /// Provider error code, if the innermost error came from the API
    pub fn api_code(&self) -> Option<i64> {
        match self.innermost() {
            TaskError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// The innermost error, looking through context wrappers
    pub fn innermost(&self) -> &TaskError {
        match self {
            TaskError::Action { source, .. }
            | TaskError::Task { source, .. }
            | TaskError::BulkSubmit { source, .. }
            | TaskError::BulkPoll { source, .. } => source.innermost(),
            other => other,
        }
    }

    /// Wrap with the action name and parameters that produced this error
    pub fn in_action(self, action: &str, params: impl std::fmt::Display) -> Self {
        TaskError::Action {
            action: action.to_string(),
            params: params.to_string(),
            source: Box::new(self),
        }
    }
}

pub type Result<T> = std::result::Result<T, TaskError>;
