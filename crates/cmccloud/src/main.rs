mod commands;
mod output;

use clap::{Parser, Subcommand};
use cmccloud_api::{ApiConfig, CmcClient, DEFAULT_API_URL};
use cmccloud_task::{CancellationToken, TimingProfile};
use colored::Colorize;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "cmc")]
#[command(about = "Manage CMC Cloud resources and wait for their tasks", long_about = None)]
struct Cli {
    /// API key
    #[arg(long, env = "CMC_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// API base URL
    #[arg(long, env = "CMC_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Per-request HTTP timeout in seconds
    #[arg(long, env = "CMC_REQUEST_TIMEOUT_SECS", default_value_t = 30, global = true)]
    request_timeout: u64,

    /// Log at debug level (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show version information
    Version,
    /// Inspect and wait for tasks
    #[command(subcommand)]
    Task(TaskCommands),
    /// Server operations
    #[command(subcommand)]
    Server(ServerCommands),
    /// Volume operations
    #[command(subcommand)]
    Volume(VolumeCommands),
    /// VPC firewall operations
    #[command(subcommand)]
    FirewallVpc(FirewallVpcCommands),
    /// Server image templates
    #[command(subcommand)]
    Image(ImageCommands),
}

#[derive(Subcommand)]
pub enum TaskCommands {
    /// Show the current status of a task
    Info { id: String },
    /// Wait for a task to finish
    Wait {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long, default_value = "long")]
        profile: TimingProfile,
    },
}

#[derive(Subcommand)]
pub enum ServerCommands {
    /// Show server details
    Info { id: String },
    /// Start a server and wait until it is running
    Start {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Stop a server and wait until it is stopped
    Stop {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Restart a server
    Restart {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Delete a server
    Delete {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Resize a server (billable)
    Resize {
        id: String,
        #[arg(long)]
        cpu: u32,
        /// RAM in GB
        #[arg(long)]
        ram: u32,
        /// Root disk in GB
        #[arg(long)]
        disk: u32,
        #[arg(long, default_value_t = 0)]
        gpu: u32,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Take a snapshot of a server (billable)
    Snapshot {
        id: String,
        /// Snapshot name
        #[arg(short, long)]
        name: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Print the web console URL
    Console { id: String },
}

#[derive(Subcommand)]
pub enum VolumeCommands {
    /// Show volume details
    Info { id: String },
    /// Delete a volume
    Delete {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
    /// Grow a volume (billable)
    Resize {
        id: String,
        /// New size in GB
        #[arg(long)]
        size: u32,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
}

#[derive(Subcommand)]
pub enum FirewallVpcCommands {
    /// List the rules of a VPC firewall
    Rules { id: String },
    /// Delete every rule of a VPC firewall
    ClearRules {
        id: String,
        /// Timing profile (short, medium, long, super-long, half-day, one-day)
        #[arg(short, long)]
        profile: Option<TimingProfile>,
    },
}

#[derive(Subcommand)]
pub enum ImageCommands {
    /// List server templates
    List,
}

impl Cli {
    fn api_config(&self) -> anyhow::Result<ApiConfig> {
        let api_key = self.api_key.clone().ok_or_else(|| {
            anyhow::anyhow!("API key is required: pass --api-key or set CMC_API_KEY")
        })?;
        Ok(ApiConfig::new(api_key)
            .with_base_url(&self.api_url)
            .with_request_timeout(Duration::from_secs(self.request_timeout)))
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Version needs no API key
    if matches!(cli.command, Commands::Version) {
        println!("cmc {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{}", "Interrupted, abandoning wait...".yellow());
            ctrl_c.cancel();
        }
    });

    let config = cli.api_config()?;
    tracing::debug!(api_url = %config.base_url, "Using API endpoint");
    let client = CmcClient::new(config)?.with_cancellation(cancel);

    match cli.command {
        Commands::Task(cmd) => commands::task::handle(&client, cmd).await?,
        Commands::Server(cmd) => commands::server::handle(&client, cmd).await?,
        Commands::Volume(cmd) => commands::volume::handle(&client, cmd).await?,
        Commands::FirewallVpc(cmd) => commands::firewall_vpc::handle(&client, cmd).await?,
        Commands::Image(cmd) => commands::image::handle(&client, cmd).await?,
        Commands::Version => {
            unreachable!("Version is handled before the client is built");
        }
    }

    Ok(())
}
