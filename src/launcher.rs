use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::sync::Arc;

use log::debug;

use crate::errors::{FATAL_EXIT_CODE, LaunchError};
use crate::locator::ResolvedCommand;
use crate::runner::Runner;
use crate::ui;

/// Everything needed to start the child: program, argv and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchSpec {
    program: PathBuf,
    args: Vec<OsString>,
    env: Vec<(OsString, OsString)>,
}

impl LaunchSpec {
    /// Spec for `command` carrying a snapshot of the current environment.
    pub fn new(command: &ResolvedCommand, args: Vec<OsString>) -> Self {
        Self {
            program: command.path().to_path_buf(),
            args,
            env: std::env::vars_os().collect(),
        }
    }

    pub fn with_env(mut self, env: Vec<(OsString, OsString)>) -> Self {
        self.env = env;
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    pub fn env(&self) -> &[(OsString, OsString)] {
        &self.env
    }
}

/// How the child ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionOutcome {
    Exited(i32),
    /// Killed by a signal; the number is only known on Unix.
    Signaled(Option<i32>),
    LaunchFailed { program: PathBuf, reason: String },
}

impl ExecutionOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ExecutionOutcome::Exited(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            ExecutionOutcome::Signaled(status.signal())
        }

        #[cfg(not(unix))]
        {
            ExecutionOutcome::Signaled(None)
        }
    }

    /// Status the bootstrapper exits with for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            ExecutionOutcome::Exited(code) => *code,
            ExecutionOutcome::Signaled(_) | ExecutionOutcome::LaunchFailed { .. } => {
                FATAL_EXIT_CODE
            }
        }
    }
}

/// Runs the resolved launcher as a transparent relay.
pub struct ProcessLauncher {
    runner: Arc<dyn Runner>,
}

impl ProcessLauncher {
    pub fn new(runner: Arc<dyn Runner>) -> Self {
        Self { runner }
    }

    /// Run the child to completion and return the status to exit with.
    pub fn run(&self, spec: &LaunchSpec) -> i32 {
        debug!(
            "launching {} with {} args",
            spec.program().display(),
            spec.args().len()
        );
        ui::launching(spec.program(), spec.args());

        let outcome = self.runner.run_inherited(spec);
        match &outcome {
            ExecutionOutcome::Exited(code) => debug!("child exited with {code}"),
            ExecutionOutcome::Signaled(signal) => debug!("child terminated by signal {signal:?}"),
            ExecutionOutcome::LaunchFailed { program, reason } => {
                let err = LaunchError::Spawn {
                    program: program.clone(),
                    reason: reason.clone(),
                };
                ui::error(err.to_string());
            }
        }
        outcome.exit_code()
    }
}
