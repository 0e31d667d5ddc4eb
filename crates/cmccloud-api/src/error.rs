//! CMC Cloud API client error types

use cmccloud_task::{ErrorKind, TaskError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Task(#[from] TaskError),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Unexpected response from {action}: {source}")]
    Decode {
        action: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ApiError {
    /// Orchestration error kind, when the failure came from a provider call
    pub fn task_kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Task(e) => Some(e.kind()),
            _ => None,
        }
    }

    pub(crate) fn decode(action: &str, source: serde_json::Error) -> Self {
        ApiError::Decode {
            action: action.to_string(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
