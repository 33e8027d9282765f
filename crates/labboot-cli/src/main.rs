//! labboot - lab topology bootstrap sequencer
//!
//! Brings the lab up in a fixed dependency order:
//!
//! 1. Probe the simulated devices for reachability
//! 2. Wait for the inventory service's API to answer
//! 3. Run the inventory seed routine exactly once
//! 4. Report the device count the inventory now holds
//! 5. Replace this process with the main application
//!
//! Probe stages that exhaust their retry budget are logged and skipped
//! past; only a failing seed routine aborts the bootstrap with a non-zero
//! exit.

use anyhow::{Context, Result};
use clap::Parser;
use std::time::Duration;
use tracing::{info, Level};

use labboot_core::{
    exec_handoff, init_tracing, Bootstrap, BootstrapConfig, PingProbe, RetryPolicy,
};

#[derive(Parser)]
#[command(name = "labboot")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Bootstrap the lab topology, then hand off to the main application", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json: bool,

    /// Inventory service base URL
    #[arg(long, env = "INVENTORY_BASE_URL", default_value = "http://inventory:8000")]
    inventory_url: String,

    /// Inventory API token
    #[arg(long, env = "INVENTORY_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Peer host that must answer a reachability probe (repeatable)
    #[arg(short, long = "peer")]
    peers: Vec<String>,

    /// Seed routine to run once the inventory is ready (invoked with no
    /// arguments, inheriting this process's environment)
    #[arg(long)]
    seed: String,

    /// Reachability probe rounds before giving up
    #[arg(long, default_value = "30")]
    reach_rounds: u32,

    /// Seconds between reachability rounds
    #[arg(long, default_value = "2")]
    reach_delay: u64,

    /// Readiness probe attempts before giving up
    #[arg(long, default_value = "60")]
    ready_attempts: u32,

    /// Seconds between readiness attempts
    #[arg(long, default_value = "5")]
    ready_delay: u64,

    /// Settle seconds after the inventory first answers
    #[arg(long, default_value = "10")]
    settle: u64,

    /// Application command to hand off to (after `--`)
    #[arg(last = true, required = true)]
    launch: Vec<String>,
}

impl Cli {
    fn into_config(self) -> BootstrapConfig {
        let mut config = BootstrapConfig::from_env()
            .with_base_url(&self.inventory_url)
            .with_peers(self.peers)
            .with_seed_command(vec![self.seed])
            .with_launch_command(self.launch);
        config.token = self.token;
        config.reach = RetryPolicy::new(self.reach_rounds, Duration::from_secs(self.reach_delay));
        config.readiness = RetryPolicy::new(self.ready_attempts, Duration::from_secs(self.ready_delay))
            .with_settle(Duration::from_secs(self.settle));
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    init_tracing(cli.json, level);

    let config = cli.into_config();
    let probe = PingProbe {
        timeout_secs: config.probe_timeout_secs,
    };

    let report = Bootstrap::new(&config, &probe)
        .run()
        .await
        .context("lab bootstrap failed")?;

    info!(
        reachability = ?report.reachability,
        readiness = ?report.readiness,
        device_count = report.device_count,
        "handing off to the main application"
    );

    // Only returns on failure; on success the process image is replaced
    Err(exec_handoff(&config.launch_command)).context("application handoff failed")
}
