//! CMC Cloud task orchestration
//!
//! Long-running provider operations (server creation, resizes, snapshots,
//! ...) are fire-and-poll: a submission returns a task id right away and the
//! caller polls the task until it reaches a terminal state. This crate holds
//! that machinery, independent of any HTTP client.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                   TaskRunner                     │
//! │   run_task / run_order / run_bulk_delete         │
//! └───────┬───────────────────────────┬──────────────┘
//!         │ submit                    │ poll
//! ┌───────▼────────┐          ┌───────▼──────────────┐
//! │   classify     │◄─────────┤  wait_for_state      │
//! │ (Outcome)      │          │  (TimingProfile,     │
//! └───────▲────────┘          │   StateSets)         │
//!         │                   └───────▲──────────────┘
//! ┌───────┴───────────────────────────┴──────────────┐
//! │            trait Transport (injected)            │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! use cmccloud_task::{ApiRequest, Params, TaskRunner, TimingProfile};
//!
//! let runner = TaskRunner::new(transport);
//! let status = runner
//!     .run_task(
//!         ApiRequest::post("server_action/stop", Params::new().with_id("s-1")),
//!         TimingProfile::LONG,
//!     )
//!     .await?;
//! ```

pub mod error;
pub mod outcome;
pub mod poller;
pub mod request;
pub mod runner;
pub mod task;
pub mod timing;
pub mod transport;

// Re-exports
pub use error::{ApiErrorOrigin, ErrorKind, Result, TaskError};
pub use outcome::{ApiErrorBody, Outcome, RawResponse, classify};
pub use poller::{Observation, Refresh, StateSets, UnknownStatePolicy, wait_for_state};
pub use request::{ApiRequest, Method, ParamValue, Params};
pub use runner::{TaskProbe, TaskRunner};
pub use task::{OrderOutcome, OrderResult, TASK_ID_FIELD, TaskHandle, TaskStatus, states};
pub use timing::TimingProfile;
pub use tokio_util::sync::CancellationToken;
pub use transport::{TASK_STATUS_ACTION, Transport};
