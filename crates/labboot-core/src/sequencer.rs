//! Bootstrap sequencing: run the stages in order, then report.
//!
//! The stage order is fixed: reachability, readiness, seed, verify. Each
//! stage runs to completion (success or exhausted budget) before the next
//! starts. Exhausted probe budgets do not stop the sequence; the seed
//! routine's failure is the only error that does.

use crate::config::BootstrapConfig;
use crate::health::ReadinessProber;
use crate::reach::{PeerProbe, ReachabilityProber};
use crate::retry::StageOutcome;
use crate::seed::Seeder;
use crate::verify::Verifier;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

/// Summary of one bootstrap run. Informational only; the handoff happens
/// whenever [`Bootstrap::run`] returns `Ok`, whatever the outcomes say.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BootstrapReport {
    /// Outcome of the reachability stage.
    pub reachability: StageOutcome,

    /// Outcome of the readiness stage.
    pub readiness: StageOutcome,

    /// Wall time the seed routine took.
    pub seed_duration: Duration,

    /// Device count observed after seeding (0 when verification degraded).
    pub device_count: u64,
}

/// Runs the bootstrap stages against one configuration.
pub struct Bootstrap<'a> {
    config: &'a BootstrapConfig,
    probe: &'a dyn PeerProbe,
}

impl<'a> Bootstrap<'a> {
    pub fn new(config: &'a BootstrapConfig, probe: &'a dyn PeerProbe) -> Self {
        Self { config, probe }
    }

    /// Run all stages in order and produce a report.
    ///
    /// Returns `Err` only for a seed failure or a configuration error
    /// (missing token) at the readiness/verify boundary.
    pub async fn run(&self) -> crate::error::Result<BootstrapReport> {
        info!("starting lab bootstrap");

        let reachability =
            ReachabilityProber::new(self.probe, &self.config.peers, self.config.reach)
                .run()
                .await;
        if let StageOutcome::Exhausted { .. } = reachability {
            // Deliberate: unreachable peers do not block the bootstrap
            info!("continuing past unreachable peers");
        }

        let readiness = ReadinessProber::new(self.config)?.run().await;
        if let StageOutcome::Exhausted { .. } = readiness {
            // Deliberate: the seed routine runs even when the inventory
            // never confirmed readiness
            info!("continuing past unconfirmed inventory readiness");
        }

        let seed_duration = Seeder::new(&self.config.seed_command).run().await?;

        let device_count = Verifier::new(self.config)?.device_count().await;

        info!(device_count, "bootstrap complete");
        Ok(BootstrapReport {
            reachability,
            readiness,
            seed_duration,
            device_count,
        })
    }
}
