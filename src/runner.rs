use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::{Arc, Mutex};

use crate::launcher::{ExecutionOutcome, LaunchSpec};

/// Capability for starting child processes.
pub trait Runner: Send + Sync {
    /// Run to completion with stdout/stderr captured.
    fn output(&self, program: &Path, args: &[OsString]) -> std::io::Result<Output>;

    /// Run with inherited stdio and exactly the environment in `spec`.
    fn run_inherited(&self, spec: &LaunchSpec) -> ExecutionOutcome;
}

pub struct OsRunner;

impl Runner for OsRunner {
    fn output(&self, program: &Path, args: &[OsString]) -> std::io::Result<Output> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
    }

    fn run_inherited(&self, spec: &LaunchSpec) -> ExecutionOutcome {
        let status = Command::new(spec.program())
            .args(spec.args())
            .env_clear()
            .envs(spec.env().iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) => ExecutionOutcome::from_status(status),
            Err(err) => ExecutionOutcome::LaunchFailed {
                program: spec.program().to_path_buf(),
                reason: err.to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunCall {
    pub program: PathBuf,
    pub args: Vec<OsString>,
}

/// Test double that records calls and returns canned results.
///
/// `output` calls (the install procedure) and `run_inherited` calls (the
/// final launch) are queued and recorded separately.
pub struct MockRunner {
    calls: Arc<Mutex<Vec<RunCall>>>,
    outputs: Arc<Mutex<Vec<std::io::Result<Output>>>>,
    launches: Arc<Mutex<Vec<LaunchSpec>>>,
    outcomes: Arc<Mutex<Vec<ExecutionOutcome>>>,
}

impl MockRunner {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            outputs: Arc::new(Mutex::new(Vec::new())),
            launches: Arc::new(Mutex::new(Vec::new())),
            outcomes: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn push_output(&self, out: std::io::Result<Output>) {
        self.outputs.lock().unwrap().push(out);
    }

    pub fn push_outcome(&self, outcome: ExecutionOutcome) {
        self.outcomes.lock().unwrap().push(outcome);
    }

    pub fn calls(&self) -> Vec<RunCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn launches(&self) -> Vec<LaunchSpec> {
        self.launches.lock().unwrap().clone()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl Runner for MockRunner {
    fn output(&self, program: &Path, args: &[OsString]) -> std::io::Result<Output> {
        self.calls.lock().unwrap().push(RunCall {
            program: program.to_path_buf(),
            args: args.to_vec(),
        });

        let mut outputs = self.outputs.lock().unwrap();
        if outputs.is_empty() {
            return Err(std::io::Error::other("MockRunner has no queued outputs"));
        }
        outputs.remove(0)
    }

    fn run_inherited(&self, spec: &LaunchSpec) -> ExecutionOutcome {
        self.launches.lock().unwrap().push(spec.clone());

        let mut outcomes = self.outcomes.lock().unwrap();
        if outcomes.is_empty() {
            return ExecutionOutcome::LaunchFailed {
                program: spec.program().to_path_buf(),
                reason: "MockRunner has no queued outcomes".to_string(),
            };
        }
        outcomes.remove(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::ResolvedCommand;
    use crate::tool::ToolName;

    #[cfg(unix)]
    #[test]
    fn mock_runner_records_calls_and_returns_outputs() {
        use std::os::unix::process::ExitStatusExt;

        let mr = MockRunner::new();
        mr.push_output(Ok(Output {
            status: std::process::ExitStatus::from_raw(0),
            stdout: b"ok".to_vec(),
            stderr: Vec::new(),
        }));

        let out = mr
            .output(Path::new("sh"), &[OsString::from("-c"), OsString::from("true")])
            .unwrap();

        assert!(out.status.success());
        assert_eq!(String::from_utf8_lossy(&out.stdout), "ok");

        let calls = mr.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].program, PathBuf::from("sh"));
        assert_eq!(calls[0].args.len(), 2);
    }

    #[test]
    fn mock_runner_errors_without_queued_output() {
        let mr = MockRunner::new();
        assert!(mr.output(Path::new("sh"), &[]).is_err());
    }

    #[test]
    fn mock_runner_records_launches() {
        let mr = MockRunner::new();
        mr.push_outcome(ExecutionOutcome::Exited(3));

        let command = ResolvedCommand::new(PathBuf::from("/usr/local/bin/uvx"), ToolName::Uvx);
        let spec = LaunchSpec::new(&command, vec![OsString::from("nativ-mcp")])
            .with_env(vec![(OsString::from("A"), OsString::from("1"))]);

        assert_eq!(mr.run_inherited(&spec), ExecutionOutcome::Exited(3));
        assert_eq!(mr.launches(), vec![spec.clone()]);
        assert!(matches!(
            mr.run_inherited(&spec),
            ExecutionOutcome::LaunchFailed { .. }
        ));
    }

    #[cfg(unix)]
    #[test]
    fn os_runner_reports_missing_program() {
        let command = ResolvedCommand::new(
            PathBuf::from("/definitely/not/here/uvx"),
            ToolName::Uvx,
        );
        let spec = LaunchSpec::new(&command, Vec::new());
        match OsRunner.run_inherited(&spec) {
            ExecutionOutcome::LaunchFailed { program, reason } => {
                assert_eq!(program, PathBuf::from("/definitely/not/here/uvx"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected launch failure, got {other:?}"),
        }
    }
}
