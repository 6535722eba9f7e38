use std::ffi::OsString;
use std::path::Path;
use std::sync::Arc;

use log::{debug, warn};

use crate::errors::LaunchError;
use crate::locator::{CommandLocator, ResolvedCommand};
use crate::runner::Runner;
use crate::tool::ToolName;
use crate::ui;

/// Captured installer stderr lines shown on failure.
const STDERR_TAIL_LINES: usize = 20;

/// The trusted uv install procedure for this platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallProcedure {
    program: &'static str,
    args: Vec<&'static str>,
    manual: &'static str,
}

impl InstallProcedure {
    #[cfg(not(windows))]
    pub fn platform() -> Self {
        // Download before piping: in `curl | sh` a failed download still exits 0.
        Self {
            program: "sh",
            args: vec![
                "-c",
                "script=$(curl -LsSf https://astral.sh/uv/install.sh) && printf '%s\\n' \"$script\" | sh",
            ],
            manual: "curl -LsSf https://astral.sh/uv/install.sh | sh",
        }
    }

    #[cfg(windows)]
    pub fn platform() -> Self {
        Self {
            program: "powershell",
            args: vec![
                "-ExecutionPolicy",
                "ByPass",
                "-c",
                "irm https://astral.sh/uv/install.ps1 | iex",
            ],
            manual: "powershell -ExecutionPolicy ByPass -c \"irm https://astral.sh/uv/install.ps1 | iex\"",
        }
    }

    /// Exact command a user can paste into a terminal.
    pub fn manual_command(&self) -> String {
        self.manual.to_string()
    }

    fn os_args(&self) -> Vec<OsString> {
        self.args.iter().map(OsString::from).collect()
    }
}

/// One-shot uv installer.
///
/// Runs the install procedure at most once per call to `run_procedure`; the
/// orchestrator only ever calls it once per invocation.
pub struct ToolInstaller {
    runner: Arc<dyn Runner>,
    procedure: InstallProcedure,
    enabled: bool,
}

impl ToolInstaller {
    pub fn new(runner: Arc<dyn Runner>, enabled: bool) -> Self {
        Self {
            runner,
            procedure: InstallProcedure::platform(),
            enabled,
        }
    }

    pub fn procedure(&self) -> &InstallProcedure {
        &self.procedure
    }

    /// Run the install procedure, with its output captured.
    pub fn run_procedure(&self) -> Result<(), LaunchError> {
        let command = self.procedure.manual_command();
        if !self.enabled {
            return Err(LaunchError::InstallDisabled { command });
        }

        ui::notice("uv not found. Installing it (one-time setup)...");
        debug!("running install procedure: {command}");

        let output = self
            .runner
            .output(Path::new(self.procedure.program), &self.procedure.os_args())
            .map_err(|err| LaunchError::InstallFailed {
                command: command.clone(),
                detail: err.to_string(),
            })?;

        if !output.status.success() {
            let tail = stderr_tail(&output.stderr);
            warn!("uv install procedure failed with {}", output.status);
            let detail = if tail.is_empty() {
                output.status.to_string()
            } else {
                format!("{}\n{tail}", output.status)
            };
            return Err(LaunchError::InstallFailed { command, detail });
        }

        ui::notice("uv installed.");
        Ok(())
    }

    /// Re-probe every variant in preference order after a successful install.
    pub fn locate_installed(locator: &CommandLocator) -> Result<ResolvedCommand, LaunchError> {
        locator
            .locate_first(&ToolName::PREFERENCE)
            .ok_or(LaunchError::NotFoundAfterInstall)
    }
}

fn stderr_tail(stderr: &[u8]) -> String {
    let text = String::from_utf8_lossy(stderr);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
