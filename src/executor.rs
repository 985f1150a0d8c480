//! Runs one external tool invocation under a deadline and turns the result
//! into the text shown on the status line.

use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::constants::status;
use crate::tool::{Invocation, Mode};

/// Failure of a single invocation. `Display` is the user-facing status text.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Error: '{tool}' not found in PATH. Install it (e.g., sudo apt install {tool}).")]
    NotFound { tool: String },
    #[error("{mode} error: {source}")]
    Launch {
        mode: Mode,
        #[source]
        source: std::io::Error,
    },
    #[error("{mode} error: {detail}")]
    Exit { mode: Mode, detail: String },
    #[error("{}", .mode.timeout_text())]
    TimedOut { mode: Mode },
}

/// Trimmed combined output of a process that exited successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completed {
    pub output: String,
}

/// Spawn the invocation and wait at most `deadline` for it.
///
/// The child is spawned with `kill_on_drop`, so both a timeout and an aborted
/// caller terminate it.
pub async fn run(invocation: &Invocation, deadline: Duration) -> Result<Completed, ToolError> {
    debug!(program = %invocation.program.display(), args = ?invocation.args, "Launching tool");

    let child = Command::new(&invocation.program)
        .args(&invocation.args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ToolError::Launch {
            mode: invocation.mode.clone(),
            source,
        })?;

    let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
        Err(_) => {
            warn!(mode = %invocation.mode, ?deadline, "Tool invocation timed out");
            return Err(ToolError::TimedOut {
                mode: invocation.mode.clone(),
            });
        }
        Ok(result) => result.map_err(|source| ToolError::Launch {
            mode: invocation.mode.clone(),
            source,
        })?,
    };

    let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    let text = combined.trim().to_string();

    if output.status.success() {
        info!(mode = %invocation.mode, "Tool invocation succeeded");
        Ok(Completed { output: text })
    } else {
        warn!(mode = %invocation.mode, status = %output.status, output = %text, "Tool invocation failed");
        let detail = if text.is_empty() {
            output.status.to_string()
        } else {
            text
        };
        Err(ToolError::Exit {
            mode: invocation.mode.clone(),
            detail,
        })
    }
}

/// Status text for a finished invocation
pub fn status_text(mode: &Mode, result: &Result<Completed, ToolError>) -> String {
    match (mode, result) {
        (_, Err(err)) => err.to_string(),
        (Mode::Reset, Ok(_)) => status::RESET_DONE.to_string(),
        (Mode::Apply { .. }, Ok(done)) if done.output.is_empty() => status::APPLIED.to_string(),
        (Mode::Apply { .. }, Ok(done)) => done.output.clone(),
    }
}
