//! Seed stage: run the external inventory-initialization routine once.

use crate::error::{BootstrapError, Result};
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::info;

/// Invokes the seed routine exactly once, synchronously.
///
/// The routine is opaque to the sequencer: it inherits the orchestrator's
/// environment (token included) and stdio, and the only thing inspected is
/// whether it terminated cleanly. A non-zero exit is the one hard failure
/// in the whole bootstrap sequence.
pub struct Seeder<'a> {
    command: &'a [String],
}

impl<'a> Seeder<'a> {
    pub fn new(command: &'a [String]) -> Self {
        Self { command }
    }

    /// Run the routine to completion. Never retried.
    pub async fn run(&self) -> Result<Duration> {
        let exe = self
            .command
            .first()
            .ok_or_else(|| BootstrapError::SeedSpawn("seed command is empty".to_string()))?;
        let args = &self.command[1..];

        info!(command = %self.command.join(" "), "running inventory seed routine");
        let start = Instant::now();

        let status = Command::new(exe)
            .args(args)
            .status()
            .await
            .map_err(|e| BootstrapError::SeedSpawn(e.to_string()))?;

        let elapsed = start.elapsed();
        if status.success() {
            info!(elapsed_ms = elapsed.as_millis() as u64, "seed routine completed");
            Ok(elapsed)
        } else {
            Err(BootstrapError::SeedFailed(status.code().unwrap_or(-1)))
        }
    }
}
