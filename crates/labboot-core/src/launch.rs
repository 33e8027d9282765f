//! Final handoff to the long-running application.

use crate::error::BootstrapError;
use tracing::info;

/// Replace the current process with the launch command.
///
/// On Unix this is a true `exec`: nothing in the orchestrator runs after a
/// successful handoff, and there is no supervision of the application. The
/// function only returns when the handoff itself failed.
#[cfg(unix)]
pub fn exec_handoff(command: &[String]) -> BootstrapError {
    use std::os::unix::process::CommandExt;

    let Some(exe) = command.first() else {
        return BootstrapError::LaunchFailed("launch command is empty".to_string());
    };

    info!(command = %command.join(" "), "handing off to application");
    let err = std::process::Command::new(exe).args(&command[1..]).exec();
    BootstrapError::LaunchFailed(err.to_string())
}

/// Fallback for platforms without `exec`: run the application to completion
/// and exit with its status.
#[cfg(not(unix))]
pub fn exec_handoff(command: &[String]) -> BootstrapError {
    let Some(exe) = command.first() else {
        return BootstrapError::LaunchFailed("launch command is empty".to_string());
    };

    info!(command = %command.join(" "), "handing off to application");
    match std::process::Command::new(exe).args(&command[1..]).status() {
        Ok(status) => std::process::exit(status.code().unwrap_or(0)),
        Err(e) => BootstrapError::LaunchFailed(e.to_string()),
    }
}
