mod probe;
mod resolve;

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::debug;

use crate::tool::ToolName;

pub use probe::ProbeDirs;
pub use resolve::{ExecutableCheck, FsExecutableCheck, find_in_dirs, find_in_path};

/// A located launcher binary and the variant it satisfies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedCommand {
    path: PathBuf,
    tool: ToolName,
}

impl ResolvedCommand {
    pub fn new(path: PathBuf, tool: ToolName) -> Self {
        Self { path, tool }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn tool(&self) -> ToolName {
        self.tool
    }
}

/// Finds launcher binaries: PATH first, then the fixed probe directories.
///
/// A miss is `None`, never an error. Lookups have no side effects, so the
/// same locator can be asked again after an install.
pub struct CommandLocator {
    search_path: Option<OsString>,
    probe_dirs: ProbeDirs,
    check: Arc<dyn ExecutableCheck>,
}

impl CommandLocator {
    pub fn new(
        search_path: Option<OsString>,
        probe_dirs: ProbeDirs,
        check: Arc<dyn ExecutableCheck>,
    ) -> Self {
        Self {
            search_path,
            probe_dirs,
            check,
        }
    }

    pub fn locate(&self, tool: ToolName) -> Option<ResolvedCommand> {
        let file_name = tool.file_name();
        let check = self.check.as_ref();

        if let Some(path) = self
            .search_path
            .as_deref()
            .and_then(|search_path| find_in_path(search_path, &file_name, check))
        {
            debug!("found {tool} on PATH at {}", path.display());
            return Some(ResolvedCommand::new(path, tool));
        }

        if let Some(path) = find_in_dirs(self.probe_dirs.iter(), &file_name, check) {
            debug!("found {tool} in probe directory at {}", path.display());
            return Some(ResolvedCommand::new(path, tool));
        }

        debug!("{tool} not found on PATH or in {} probe directories", self.probe_dirs.len());
        None
    }

    /// Locate each variant in `tools` order and keep the first hit.
    pub fn locate_first(&self, tools: &[ToolName]) -> Option<ResolvedCommand> {
        tools.iter().find_map(|tool| self.locate(*tool))
    }
}
