//! Readiness stage: poll the inventory service's health endpoint.

use crate::config::{BootstrapConfig, RetryPolicy, TOKEN_ENV};
use crate::error::{BootstrapError, Result};
use crate::retry::{poll_until, StageOutcome};
use tracing::{debug, info, warn};

/// Polls the inventory API until it answers, then settles.
///
/// An attempt succeeds when the request completes without transport error;
/// the status code is not inspected. A listener that answers 4xx/5xx still
/// counts as up, which is why the settle delay exists: the service's HTTP
/// listener opens before its application logic finishes initialising.
#[derive(Debug)]
pub struct ReadinessProber {
    client: reqwest::Client,
    health_url: String,
    token: String,
    policy: RetryPolicy,
}

impl ReadinessProber {
    /// Build a prober from the run configuration.
    ///
    /// A missing token is a configuration error, not a probe failure, and
    /// is surfaced here rather than silently retried against.
    pub fn new(config: &BootstrapConfig) -> Result<Self> {
        let token = config
            .token
            .clone()
            .ok_or(BootstrapError::MissingToken(TOKEN_ENV))?;

        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(concat!("labboot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            health_url: format!("{}/api/", config.base_url),
            token,
            policy: config.readiness,
        })
    }

    /// Poll until the API answers or the budget runs out.
    ///
    /// Exhaustion is a soft failure: the caller continues regardless.
    pub async fn run(&self) -> StageOutcome {
        info!(url = %self.health_url, "waiting for inventory API");

        let outcome = poll_until("readiness", &self.policy, |attempt| {
            let client = &self.client;
            let url = &self.health_url;
            let token = &self.token;
            async move {
                let result = client
                    .get(url.as_str())
                    .header("Authorization", format!("Token {}", token))
                    .send()
                    .await;

                match result {
                    Ok(response) => {
                        debug!(attempt, status = %response.status(), "inventory API answered");
                        true
                    }
                    Err(e) => {
                        debug!(attempt, error = %e, "inventory API not answering");
                        false
                    }
                }
            }
        })
        .await;

        match outcome {
            StageOutcome::Ready { attempts } => {
                info!(attempts, "inventory API is available");
            }
            StageOutcome::Exhausted { attempts } => {
                warn!(
                    attempts,
                    "inventory API never became available, continuing anyway"
                );
            }
        }
        outcome
    }
}
