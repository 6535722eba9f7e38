use std::sync::Arc;

use log::debug;

use crate::config::LauncherConfig;
use crate::errors::LaunchError;
use crate::installer::ToolInstaller;
use crate::launcher::{LaunchSpec, ProcessLauncher};
use crate::locator::{CommandLocator, ExecutableCheck, FsExecutableCheck, ResolvedCommand};
use crate::runner::{OsRunner, Runner};
use crate::tool::ToolName;
use crate::ui;

/// Steps of the resolve-install-launch cascade.
#[derive(Debug)]
pub enum State {
    ProbePrimary,
    ProbeSecondary,
    Install,
    ProbeAfterInstall,
    Launch(ResolvedCommand),
    Fatal(LaunchError),
}

/// Result of performing the effect a state asks for.
#[derive(Debug)]
pub enum Event {
    Probed(Option<ResolvedCommand>),
    Installed(Result<(), LaunchError>),
    /// Variants re-probed in preference order after an install.
    ReProbed(Result<ResolvedCommand, LaunchError>),
}

impl State {
    /// Pure transition function.
    pub fn next(self, event: Event) -> State {
        match (self, event) {
            (State::ProbePrimary, Event::Probed(Some(command))) => State::Launch(command),
            (State::ProbePrimary, Event::Probed(None)) => State::ProbeSecondary,
            (State::ProbeSecondary, Event::Probed(Some(command))) => State::Launch(command),
            (State::ProbeSecondary, Event::Probed(None)) => State::Install,
            (State::Install, Event::Installed(Ok(()))) => State::ProbeAfterInstall,
            (State::Install, Event::Installed(Err(err))) => State::Fatal(err),
            (State::ProbeAfterInstall, Event::ReProbed(Ok(command))) => State::Launch(command),
            (State::ProbeAfterInstall, Event::ReProbed(Err(err))) => State::Fatal(err),
            (state, event) => {
                debug!("ignoring {event:?} in state {}", state.name());
                state
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            State::ProbePrimary => "probe-primary",
            State::ProbeSecondary => "probe-secondary",
            State::Install => "install",
            State::ProbeAfterInstall => "probe-after-install",
            State::Launch(_) => "launch",
            State::Fatal(_) => "fatal",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Launch(_) | State::Fatal(_))
    }
}

/// Drives the cascade and hands the winner to the launcher.
pub struct Orchestrator {
    config: LauncherConfig,
    locator: CommandLocator,
    installer: ToolInstaller,
    launcher: ProcessLauncher,
}

impl Orchestrator {
    pub fn new(config: LauncherConfig, runner: Arc<dyn Runner>, check: Arc<dyn ExecutableCheck>) -> Self {
        let locator = CommandLocator::new(
            config.search_path.clone(),
            config.probe_dirs.clone(),
            check,
        );
        let installer = ToolInstaller::new(runner.clone(), config.install_enabled);
        let launcher = ProcessLauncher::new(runner);
        Self {
            config,
            locator,
            installer,
            launcher,
        }
    }

    /// Real processes and the real filesystem.
    pub fn system(config: LauncherConfig) -> Self {
        Self::new(config, Arc::new(OsRunner), Arc::new(FsExecutableCheck))
    }

    /// Walk the state machine until it reaches `Launch` or `Fatal`.
    pub fn resolve(&self) -> Result<ResolvedCommand, LaunchError> {
        let mut state = State::ProbePrimary;
        loop {
            debug!("bootstrap state: {}", state.name());
            state = match state {
                State::Launch(command) => return Ok(command),
                State::Fatal(err) => return Err(err),
                state => {
                    let event = self.perform(&state);
                    state.next(event)
                }
            };
        }
    }

    fn perform(&self, state: &State) -> Event {
        match state {
            State::ProbePrimary => Event::Probed(self.locator.locate(ToolName::Uvx)),
            State::ProbeSecondary => Event::Probed(self.locator.locate(ToolName::UvToolRun)),
            State::Install => Event::Installed(self.installer.run_procedure()),
            State::ProbeAfterInstall => {
                Event::ReProbed(ToolInstaller::locate_installed(&self.locator))
            }
            State::Launch(_) | State::Fatal(_) => {
                unreachable!("terminal states have no effect")
            }
        }
    }

    /// Resolve and run the package. Returns the status to exit with.
    pub fn run(&self) -> i32 {
        match self.resolve() {
            Ok(command) => {
                let args = command
                    .tool()
                    .launch_args(&self.config.package, &self.config.extra_args);
                let spec = LaunchSpec::new(&command, args);
                self.launcher.run(&spec)
            }
            Err(err) => {
                ui::error(err.to_string());
                err.exit_code()
            }
        }
    }
}
