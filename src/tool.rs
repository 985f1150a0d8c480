//! External display-adjustment tool (redshift-compatible command line)

use std::path::PathBuf;

use tracing::{info, warn};

use crate::constants::status;
use crate::executor::ToolError;
use crate::params::Snapshot;

/// Which kind of invocation is running; selects error prefixes and timeout text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Apply a snapshot; errors are prefixed with the tool name
    Apply { tool_name: String },
    Reset,
}

impl Mode {
    pub fn label(&self) -> &str {
        match self {
            Mode::Apply { tool_name } => tool_name,
            Mode::Reset => status::RESET_MODE,
        }
    }

    pub fn timeout_text(&self) -> &'static str {
        match self {
            Mode::Apply { .. } => status::APPLY_TIMED_OUT,
            Mode::Reset => status::RESET_TIMED_OUT,
        }
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One fully built command line
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub mode: Mode,
    pub program: PathBuf,
    pub args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Tool {
    program: PathBuf,
    method: String,
}

impl Tool {
    pub fn new(program: impl Into<PathBuf>, method: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            method: method.into(),
        }
    }

    /// Short name used in messages ("redshift" for "/usr/bin/redshift")
    pub fn name(&self) -> String {
        self.program
            .file_name()
            .unwrap_or(self.program.as_os_str())
            .to_string_lossy()
            .into_owned()
    }

    /// `-m <method> -P -O <K> -g <g>:<g>:<g> -b <b>`
    pub fn apply(&self, snapshot: &Snapshot) -> Invocation {
        let gamma = format!("{:.2}", snapshot.gamma);
        let args = vec![
            "-m".to_string(),
            self.method.clone(),
            // drop previous ramps so adjustments don't stack
            "-P".to_string(),
            "-O".to_string(),
            snapshot.temperature.to_string(),
            "-g".to_string(),
            format!("{gamma}:{gamma}:{gamma}"),
            "-b".to_string(),
            format!("{:.2}", snapshot.brightness),
        ];
        Invocation {
            mode: Mode::Apply {
                tool_name: self.name(),
            },
            program: self.program.clone(),
            args,
        }
    }

    pub fn reset(&self) -> Invocation {
        Invocation {
            mode: Mode::Reset,
            program: self.program.clone(),
            args: vec!["-x".to_string()],
        }
    }

    /// Resolve the program on PATH (or as given, if it is a path)
    pub fn locate(&self) -> Result<PathBuf, ToolError> {
        match which::which(&self.program) {
            Ok(path) => {
                info!(tool = %self.name(), path = %path.display(), "Resolved adjustment tool");
                Ok(path)
            }
            Err(err) => {
                warn!(tool = %self.name(), error = %err, "Adjustment tool not found");
                Err(ToolError::NotFound { tool: self.name() })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_arguments() {
        let tool = Tool::new("redshift", "randr");
        let inv = tool.apply(&Snapshot::new(4500.0, 0.8, 1.25));
        assert_eq!(
            inv.args,
            ["-m", "randr", "-P", "-O", "4500", "-g", "1.25:1.25:1.25", "-b", "0.80"]
        );
        assert_eq!(inv.program, PathBuf::from("redshift"));
        assert_eq!(inv.mode.label(), "redshift");
    }

    #[test]
    fn test_apply_respects_method() {
        let tool = Tool::new("redshift", "vidmode");
        let inv = tool.apply(&Snapshot::defaults());
        assert_eq!(inv.args[1], "vidmode");
        assert_eq!(inv.args[6], "1.00:1.00:1.00");
        assert_eq!(inv.args[8], "1.00");
    }

    #[test]
    fn test_reset_arguments() {
        let inv = Tool::new("/usr/local/bin/redshift", "randr").reset();
        assert_eq!(inv.args, ["-x"]);
        assert_eq!(inv.mode, Mode::Reset);
        assert_eq!(inv.mode.to_string(), "reset");
    }

    #[test]
    fn test_name_strips_directory() {
        let tool = Tool::new("/opt/tools/redshift", "randr");
        assert_eq!(tool.name(), "redshift");
    }

    #[test]
    fn test_locate_missing_tool() {
        let tool = Tool::new("screen-dimmer-no-such-tool-7f3a", "randr");
        let err = tool.locate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: 'screen-dimmer-no-such-tool-7f3a' not found in PATH. \
             Install it (e.g., sudo apt install screen-dimmer-no-such-tool-7f3a)."
        );
    }

    #[test]
    fn test_not_found_message_for_default_tool() {
        let err = ToolError::NotFound {
            tool: "redshift".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Error: 'redshift' not found in PATH. Install it (e.g., sudo apt install redshift)."
        );
    }
}
