//! labboot core library
//!
//! Staged bootstrap for the lab topology:
//! - Probes the simulated devices for reachability
//! - Waits for the inventory service's API to answer
//! - Runs the external inventory seed routine once
//! - Verifies the seed by reporting the device count
//! - Hands off to the long-running application

pub mod config;
pub mod error;
pub mod health;
pub mod launch;
pub mod reach;
pub mod retry;
pub mod seed;
pub mod sequencer;
pub mod telemetry;
pub mod verify;

pub use config::{BootstrapConfig, RetryPolicy, BASE_URL_ENV, TOKEN_ENV};
pub use error::{BootstrapError, Result};
pub use health::ReadinessProber;
pub use launch::exec_handoff;
pub use reach::{PeerProbe, PingProbe, ReachabilityProber};
pub use retry::{poll_until, StageOutcome};
pub use seed::Seeder;
pub use sequencer::{Bootstrap, BootstrapReport};
pub use telemetry::init_tracing;
pub use verify::Verifier;

/// labboot version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
