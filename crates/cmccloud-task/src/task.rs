//! Task and order value types

use crate::error::{Result, TaskError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field carrying the task id in submission responses
pub const TASK_ID_FIELD: &str = "jobid";

/// Task status strings reported by the provider
pub mod states {
    pub const WAIT: &str = "WAIT";
    pub const PROCESSING: &str = "PROCESSING";
    pub const DONE: &str = "DONE";
    pub const ERROR: &str = "ERROR";
}

/// Decode a task id that the provider may send as a string or a number
///
/// `null` and a missing field decode as the empty string.
pub fn deserialize_task_id<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Str(String),
        Num(serde_json::Number),
    }

    Ok(match Option::<RawId>::deserialize(deserializer)? {
        Some(RawId::Str(s)) => s.trim().to_string(),
        Some(RawId::Num(n)) => n.to_string(),
        None => String::new(),
    })
}

/// Opaque id of a provider task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHandle(String);

#[derive(Deserialize)]
struct Submission {
    #[serde(rename = "jobid", default, deserialize_with = "deserialize_task_id")]
    task_id: String,
}

impl TaskHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extract the task id from a submission response body
    ///
    /// The id may be encoded as a string or a number. A body without a
    /// usable id is a [`TaskError::MalformedSubmission`].
    pub fn from_submission(action: &str, body: &str) -> Result<Self> {
        let malformed = || TaskError::MalformedSubmission {
            action: action.to_string(),
            body: body.to_string(),
        };

        let submission: Submission = serde_json::from_str(body).map_err(|_| malformed())?;
        if submission.task_id.is_empty() {
            return Err(malformed());
        }
        Ok(Self(submission.task_id))
    }
}

impl fmt::Display for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskHandle {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Status of a task as reported by the provider
///
/// A `jobid` echoed next to `id` stays in `payload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    #[serde(default, deserialize_with = "deserialize_task_id")]
    pub id: String,

    /// Lifecycle state (`WAIT`, `PROCESSING`, `DONE`, `ERROR`, ...)
    #[serde(default)]
    pub status: String,

    /// Provider-specific detail fields
    #[serde(flatten)]
    pub payload: serde_json::Map<String, serde_json::Value>,
}

impl TaskStatus {
    pub fn is_done(&self) -> bool {
        self.status == states::DONE
    }

    /// Get a payload field as a specific type
    pub fn get<T: serde::de::DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.payload
            .get(key)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }
}

/// Submission result of a billable action
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    #[serde(rename = "jobid", default, deserialize_with = "deserialize_task_id")]
    pub task_id: String,

    #[serde(default)]
    pub price: i64,

    #[serde(default)]
    pub paid: bool,
}

impl OrderResult {
    pub fn task(&self) -> TaskHandle {
        TaskHandle::new(self.task_id.clone())
    }
}

/// Result of a completed order: what was billed and how the task ended
#[derive(Debug, Clone, PartialEq)]
pub struct OrderOutcome {
    pub order: OrderResult,
    pub status: TaskStatus,
}
