//! Bootstrap configuration.
//!
//! Every stage receives its inputs through [`BootstrapConfig`] rather than
//! reading the process environment itself, so stages stay testable in
//! isolation. [`BootstrapConfig::from_env`] is the only place ambient
//! environment is consulted.

use std::time::Duration;

/// Environment variable holding the inventory API token.
pub const TOKEN_ENV: &str = "INVENTORY_TOKEN";

/// Environment variable holding the inventory base URL.
pub const BASE_URL_ENV: &str = "INVENTORY_BASE_URL";

/// Bounded-retry parameters for a polling stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts (or rounds) before giving up.
    pub max_attempts: u32,

    /// Fixed sleep between attempts.
    pub delay: Duration,

    /// Fixed sleep applied once after the first successful attempt,
    /// absorbing startup lag the probe itself cannot observe.
    pub settle: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            settle: Duration::ZERO,
        }
    }

    pub fn with_settle(mut self, settle: Duration) -> Self {
        self.settle = settle;
        self
    }

    /// Default budget for the reachability stage: 30 rounds, 2s apart.
    pub fn reachability() -> Self {
        Self::new(30, Duration::from_secs(2))
    }

    /// Default budget for the readiness stage: 60 attempts, 5s apart,
    /// 10s settle after the first success.
    pub fn readiness() -> Self {
        Self::new(60, Duration::from_secs(5)).with_settle(Duration::from_secs(10))
    }
}

/// Configuration for one bootstrap run, fixed at process start.
#[derive(Debug, Clone)]
pub struct BootstrapConfig {
    /// Inventory service base URL, without a trailing slash.
    pub base_url: String,

    /// Inventory API token. `None` when the environment did not provide
    /// one; the authenticated stages surface this as a configuration error.
    pub token: Option<String>,

    /// Peer hosts that must answer a reachability probe.
    pub peers: Vec<String>,

    /// Retry budget for the reachability stage.
    pub reach: RetryPolicy,

    /// Retry budget for the readiness stage.
    pub readiness: RetryPolicy,

    /// Per-packet timeout for a single reachability probe, in seconds.
    pub probe_timeout_secs: u64,

    /// Per-request timeout for inventory API calls.
    pub http_timeout: Duration,

    /// Seed routine invoked once after readiness (first element is the
    /// executable).
    pub seed_command: Vec<String>,

    /// Long-running application the bootstrap hands off to.
    pub launch_command: Vec<String>,
}

impl BootstrapConfig {
    /// Build a configuration from the process environment, with the
    /// stock retry budgets.
    pub fn from_env() -> Self {
        let base_url = std::env::var(BASE_URL_ENV)
            .unwrap_or_else(|_| "http://inventory:8000".to_string());

        BootstrapConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: std::env::var(TOKEN_ENV).ok(),
            peers: Vec::new(),
            reach: RetryPolicy::reachability(),
            readiness: RetryPolicy::readiness(),
            probe_timeout_secs: 1,
            http_timeout: Duration::from_secs(5),
            seed_command: Vec::new(),
            launch_command: Vec::new(),
        }
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    pub fn with_peers(mut self, peers: Vec<String>) -> Self {
        self.peers = peers;
        self
    }

    pub fn with_seed_command(mut self, command: Vec<String>) -> Self {
        self.seed_command = command;
        self
    }

    pub fn with_launch_command(mut self, command: Vec<String>) -> Self {
        self.launch_command = command;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_budgets() {
        let reach = RetryPolicy::reachability();
        assert_eq!(reach.max_attempts, 30);
        assert_eq!(reach.delay, Duration::from_secs(2));
        assert_eq!(reach.settle, Duration::ZERO);

        let readiness = RetryPolicy::readiness();
        assert_eq!(readiness.max_attempts, 60);
        assert_eq!(readiness.delay, Duration::from_secs(5));
        assert_eq!(readiness.settle, Duration::from_secs(10));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = BootstrapConfig::from_env().with_base_url("http://inventory:8000/");
        assert_eq!(config.base_url, "http://inventory:8000");
    }

    #[test]
    fn test_builder_chain() {
        let config = BootstrapConfig::from_env()
            .with_token("abc123")
            .with_peers(vec!["device1".to_string(), "device2".to_string()])
            .with_seed_command(vec!["./seed".to_string()]);

        assert_eq!(config.token.as_deref(), Some("abc123"));
        assert_eq!(config.peers.len(), 2);
        assert_eq!(config.seed_command, vec!["./seed".to_string()]);
    }
}
