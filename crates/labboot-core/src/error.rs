//! Error types for the bootstrap sequencer

use thiserror::Error;

/// Errors that can occur while bootstrapping the lab topology
#[derive(Error, Debug)]
pub enum BootstrapError {
    /// Auth token not present in the environment
    #[error("inventory API token is not set (expected {0} in the environment)")]
    MissingToken(&'static str),

    /// Seed routine could not be started
    #[error("seed routine failed to start: {0}")]
    SeedSpawn(String),

    /// Seed routine ran but signalled fatal failure
    #[error("seed routine exited with code {0}")]
    SeedFailed(i32),

    /// Handoff to the main application failed
    #[error("launch failed: {0}")]
    LaunchFailed(String),

    /// HTTP error (inventory API)
    #[error("HTTP error: {0}")]
    Http(String),
}

impl From<reqwest::Error> for BootstrapError {
    fn from(err: reqwest::Error) -> Self {
        BootstrapError::Http(err.to_string())
    }
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, BootstrapError>;
