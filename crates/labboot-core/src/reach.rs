//! Reachability stage: confirm the simulated devices answer a network probe.

use crate::config::RetryPolicy;
use crate::retry::{poll_until, StageOutcome};
use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

/// A single-host reachability check.
///
/// Seam for tests; production uses [`PingProbe`].
#[async_trait]
pub trait PeerProbe: Send + Sync {
    async fn is_reachable(&self, host: &str) -> bool;
}

/// Probes a host with one ICMP echo packet via the system `ping`.
pub struct PingProbe {
    /// Per-packet wait in seconds (`ping -W`).
    pub timeout_secs: u64,
}

#[async_trait]
impl PeerProbe for PingProbe {
    async fn is_reachable(&self, host: &str) -> bool {
        let status = Command::new("ping")
            .args(["-c", "1", "-W", &self.timeout_secs.to_string(), host])
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .status()
            .await;

        match status {
            Ok(s) => s.success(),
            Err(e) => {
                debug!(host, error = %e, "ping invocation failed");
                false
            }
        }
    }
}

/// Probes all declared peers in rounds until every peer answers within the
/// same round or the budget runs out.
pub struct ReachabilityProber<'a> {
    probe: &'a dyn PeerProbe,
    peers: &'a [String],
    policy: RetryPolicy,
}

impl<'a> ReachabilityProber<'a> {
    pub fn new(probe: &'a dyn PeerProbe, peers: &'a [String], policy: RetryPolicy) -> Self {
        Self {
            probe,
            peers,
            policy,
        }
    }

    /// Run probe rounds. A round succeeds only when every peer answers in
    /// that round; a partial round does not advance state.
    ///
    /// Exhaustion is a soft failure: the caller continues regardless.
    pub async fn run(&self) -> StageOutcome {
        if self.peers.is_empty() {
            info!("no peers declared, skipping reachability stage");
            return StageOutcome::Ready { attempts: 0 };
        }

        let probe = self.probe;
        let peers = self.peers;
        let outcome = poll_until("reachability", &self.policy, |round| async move {
            let mut all_up = true;
            for host in peers {
                let up = probe.is_reachable(host).await;
                debug!(host = %host, round, up, "peer probe");
                if !up {
                    all_up = false;
                }
            }
            all_up
        })
        .await;

        match outcome {
            StageOutcome::Ready { attempts } => {
                info!(rounds = attempts, "all devices are available");
            }
            StageOutcome::Exhausted { attempts } => {
                warn!(
                    rounds = attempts,
                    "some devices never answered, continuing anyway"
                );
            }
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::time::Duration;

    /// Fake probe: hosts in `down` never answer, everything else always does.
    struct FakeProbe {
        down: HashSet<String>,
        calls: AtomicU32,
    }

    impl FakeProbe {
        fn all_up() -> Self {
            Self {
                down: HashSet::new(),
                calls: AtomicU32::new(0),
            }
        }

        fn with_down(host: &str) -> Self {
            let mut down = HashSet::new();
            down.insert(host.to_string());
            Self {
                down,
                calls: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl PeerProbe for FakeProbe {
        async fn is_reachable(&self, host: &str) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            !self.down.contains(host)
        }
    }

    fn peers() -> Vec<String> {
        vec!["device1".to_string(), "device2".to_string()]
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_peers_up_completes_in_one_round() {
        let probe = FakeProbe::all_up();
        let peers = peers();
        let policy = RetryPolicy::new(30, Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        let outcome = ReachabilityProber::new(&probe, &peers, policy).run().await;

        assert_eq!(outcome, StageOutcome::Ready { attempts: 1 });
        assert_eq!(start.elapsed(), Duration::ZERO);
        assert_eq!(probe.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_peer_down_exhausts_full_budget() {
        let probe = FakeProbe::with_down("device2");
        let peers = peers();
        let policy = RetryPolicy::new(30, Duration::from_secs(2));
        let start = tokio::time::Instant::now();

        let outcome = ReachabilityProber::new(&probe, &peers, policy).run().await;

        // Soft failure: full budget consumed, control still returns
        assert_eq!(outcome, StageOutcome::Exhausted { attempts: 30 });
        assert_eq!(start.elapsed(), Duration::from_secs(60));
        // Every peer is probed every round, even after one has failed
        assert_eq!(probe.calls.load(Ordering::SeqCst), 60);
    }

    #[tokio::test]
    async fn test_no_peers_is_trivially_ready() {
        let probe = FakeProbe::all_up();
        let peers: Vec<String> = Vec::new();
        let policy = RetryPolicy::reachability();

        let outcome = ReachabilityProber::new(&probe, &peers, policy).run().await;

        assert_eq!(outcome, StageOutcome::Ready { attempts: 0 });
        assert_eq!(probe.calls.load(Ordering::SeqCst), 0);
    }
}
