use std::path::PathBuf;

use thiserror::Error;

/// Exit status used for every fatal bootstrapper condition.
pub const FATAL_EXIT_CODE: i32 = 1;

#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Failed to install uv: {detail}\nInstall it manually with:\n  {command}")]
    InstallFailed { command: String, detail: String },

    #[error(
        "uv is not installed and automatic install is disabled (NATIV_MCP_NO_INSTALL).\nInstall it manually with:\n  {command}"
    )]
    InstallDisabled { command: String },

    #[error("uv was installed but could not be found. Restart your terminal and try again.")]
    NotFoundAfterInstall,

    #[error("Failed to start {}: {reason}", .program.display())]
    Spawn { program: PathBuf, reason: String },
}

impl LaunchError {
    pub fn exit_code(&self) -> i32 {
        FATAL_EXIT_CODE
    }
}
