//! Bounded retry loop shared by the polling stages.
//!
//! Both probers are the same loop with different probes and budgets, so the
//! loop lives here once: attempt, sleep on failure, stop on success or when
//! the budget runs out. The outcome is an explicit variant rather than a
//! boolean so the sequencer's decision to continue past an exhausted budget
//! is a visible branch.

use crate::config::RetryPolicy;
use serde::{Deserialize, Serialize};
use std::future::Future;
use tracing::{debug, info};

/// Terminal state of one polling stage.
///
/// Transitions are forward-only; a stage that exhausted its budget is never
/// re-entered within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StageOutcome {
    /// The probe succeeded on the recorded attempt.
    Ready { attempts: u32 },

    /// Every attempt in the budget failed.
    Exhausted { attempts: u32 },
}

impl StageOutcome {
    pub fn is_ready(&self) -> bool {
        matches!(self, StageOutcome::Ready { .. })
    }

    /// Number of attempts consumed, regardless of outcome.
    pub fn attempts(&self) -> u32 {
        match self {
            StageOutcome::Ready { attempts } => *attempts,
            StageOutcome::Exhausted { attempts } => *attempts,
        }
    }
}

/// Run `probe` up to `policy.max_attempts` times, sleeping `policy.delay`
/// after each failed attempt.
///
/// On the first success, sleeps `policy.settle` and returns
/// [`StageOutcome::Ready`]. The settle pause absorbs startup lag that the
/// probe cannot observe (a listener that answers before the service behind
/// it is fully initialised).
///
/// The closure receives the 1-based attempt number.
pub async fn poll_until<F, Fut>(stage: &str, policy: &RetryPolicy, mut probe: F) -> StageOutcome
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = bool>,
{
    for attempt in 1..=policy.max_attempts {
        if probe(attempt).await {
            info!(stage, attempt, "probe succeeded");
            if !policy.settle.is_zero() {
                debug!(stage, settle_secs = policy.settle.as_secs(), "settling");
                tokio::time::sleep(policy.settle).await;
            }
            return StageOutcome::Ready { attempts: attempt };
        }

        debug!(
            stage,
            attempt,
            max_attempts = policy.max_attempts,
            "probe failed, retrying"
        );
        tokio::time::sleep(policy.delay).await;
    }

    info!(
        stage,
        attempts = policy.max_attempts,
        "retry budget exhausted"
    );
    StageOutcome::Exhausted {
        attempts: policy.max_attempts,
    }
}
