mod config;
mod errors;
mod installer;
mod launcher;
mod locator;
mod orchestrator;
pub mod runner;
mod tool;
pub mod ui;

pub use crate::config::{LauncherConfig, NO_INSTALL_ENV, PACKAGE_ENV};
pub use crate::errors::{FATAL_EXIT_CODE, LaunchError};
pub use crate::installer::{InstallProcedure, ToolInstaller};
pub use crate::launcher::{ExecutionOutcome, LaunchSpec, ProcessLauncher};
pub use crate::locator::{CommandLocator, ExecutableCheck, FsExecutableCheck, ProbeDirs, ResolvedCommand};
pub use crate::orchestrator::{Event, Orchestrator, State};
pub use crate::tool::{DEFAULT_PACKAGE, ToolName};
