//! CMC Cloud API client
//!
//! HTTP transport, configuration and per-resource services on top of the
//! `cmccloud-task` orchestration core.
//!
//! # Requirements
//!
//! - `CMC_API_KEY` env var (or an explicit [`ApiConfig`])
//!
//! # Example
//!
//! ```ignore
//! use cmccloud_api::{ApiConfig, CmcClient};
//!
//! let client = CmcClient::new(ApiConfig::from_env()?)?;
//!
//! // Stop a server and wait for the task
//! let status = client.servers().stop("server-id", None).await?;
//!
//! // Remove every rule of a VPC firewall
//! client.vpc_firewalls().delete_all_rules("firewall-id", None).await?;
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod firewall_direct;
pub mod firewall_vpc;
pub mod floating_ip;
pub mod http;
pub mod image;
pub mod server;
pub mod snapshot;
pub mod task;
pub mod volume;
pub mod vpc;

pub use client::CmcClient;
pub use config::{ApiConfig, DEFAULT_API_URL};
pub use error::{ApiError, Result};
pub use firewall_direct::{FirewallDirect, FirewallDirectRule};
pub use firewall_vpc::{FirewallVpc, FirewallVpcRule, RuleSpec};
pub use floating_ip::FloatingIp;
pub use http::HttpTransport;
pub use image::Image;
pub use server::{Flavor, Nic, Server};
pub use snapshot::Snapshot;
pub use volume::Volume;
pub use vpc::{NewVpc, Vpc};
