//! Response classification
//!
//! The provider signals failure in three ways: a non-2xx status with an
//! error body, a 2xx status whose body is an error object, or a transport
//! failure before any response arrived. [`classify`] folds all of them into
//! one [`Outcome`], checking in that fixed order:
//!
//! 1. transport error
//! 2. structured error decoded by the transport
//! 3. error object embedded in the body
//! 4. success

use crate::error::{ApiErrorOrigin, Result, TaskError};
use serde::{Deserialize, Serialize};

const ERROR_CODE_MARKER: &str = "error_code";
const ERROR_TEXT_MARKER: &str = "error_text";

/// Provider error payload (`{"error_code": .., "error_text": ..}`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub error_code: i64,
    #[serde(default)]
    pub error_text: String,
}

impl ApiErrorBody {
    pub fn new(error_code: i64, error_text: impl Into<String>) -> Self {
        Self {
            error_code,
            error_text: error_text.into(),
        }
    }

    fn is_zero(&self) -> bool {
        self.error_code == 0 && self.error_text.is_empty()
    }
}

/// What the transport observed for one call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawResponse {
    /// HTTP status, 0 when no response was received
    pub status: u16,
    pub body: String,
    /// Network, TLS or timeout failure
    pub transport_error: Option<String>,
    /// Error payload decoded from a non-2xx response
    pub structured_error: Option<ApiErrorBody>,
}

impl RawResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self {
            status: 200,
            body: body.into(),
            ..Default::default()
        }
    }

    pub fn failed(status: u16, error: ApiErrorBody, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            structured_error: Some(error),
            ..Default::default()
        }
    }

    pub fn transport_failure(message: impl Into<String>) -> Self {
        Self {
            transport_error: Some(message.into()),
            ..Default::default()
        }
    }
}

/// Normalised result of one provider call
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(String),
    StructuredApiError { code: i64, text: String },
    EmbeddedApiError { code: i64, text: String },
    TransportError(String),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Success body, or the matching [`TaskError`]
    pub fn into_result(self) -> Result<String> {
        match self {
            Outcome::Success(body) => Ok(body),
            Outcome::StructuredApiError { code, text } => Err(TaskError::Api {
                code,
                text,
                origin: ApiErrorOrigin::Structured,
            }),
            Outcome::EmbeddedApiError { code, text } => Err(TaskError::Api {
                code,
                text,
                origin: ApiErrorOrigin::Embedded,
            }),
            Outcome::TransportError(message) => Err(TaskError::Transport(message)),
        }
    }
}

/// Classify a raw response
pub fn classify(response: &RawResponse) -> Outcome {
    if let Some(err) = &response.transport_error {
        return Outcome::TransportError(err.clone());
    }

    if let Some(payload) = response.structured_error.as_ref().filter(|p| !p.is_zero()) {
        let code = if payload.error_code == 0 {
            i64::from(response.status)
        } else {
            payload.error_code
        };
        return Outcome::StructuredApiError {
            code,
            text: payload.error_text.clone(),
        };
    }

    if response.body.contains(ERROR_CODE_MARKER) && response.body.contains(ERROR_TEXT_MARKER) {
        return match serde_json::from_str::<ApiErrorBody>(&response.body) {
            Ok(payload) => Outcome::EmbeddedApiError {
                code: payload.error_code,
                text: payload.error_text,
            },
            Err(_) => Outcome::EmbeddedApiError {
                code: i64::from(response.status),
                text: response.body.clone(),
            },
        };
    }

    Outcome::Success(response.body.clone())
}
