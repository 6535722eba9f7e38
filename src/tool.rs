use std::ffi::{OsStr, OsString};
use std::fmt;

/// Package run through uv when `NATIV_MCP_PACKAGE` is not set.
pub const DEFAULT_PACKAGE: &str = "nativ-mcp";

/// The two invocation styles of the uv launcher.
///
/// Both run the same package; they only differ in binary name and the
/// arguments placed in front of the package spec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    /// `uvx <package>`: ephemeral single-run execution.
    Uvx,
    /// `uv tool run <package>`: generic tool invocation.
    UvToolRun,
}

impl ToolName {
    /// Fixed preference order. The fast variant always wins.
    pub const PREFERENCE: [ToolName; 2] = [ToolName::Uvx, ToolName::UvToolRun];

    pub fn binary(self) -> &'static str {
        match self {
            ToolName::Uvx => "uvx",
            ToolName::UvToolRun => "uv",
        }
    }

    /// File name to look for on disk (`uvx.exe` on Windows).
    pub fn file_name(self) -> String {
        format!("{}{}", self.binary(), std::env::consts::EXE_SUFFIX)
    }

    /// Argument vector for running `package`, followed by `extra` verbatim.
    pub fn launch_args(self, package: &OsStr, extra: &[OsString]) -> Vec<OsString> {
        let mut args: Vec<OsString> = match self {
            ToolName::Uvx => Vec::with_capacity(extra.len() + 1),
            ToolName::UvToolRun => vec![OsString::from("tool"), OsString::from("run")],
        };
        args.push(OsString::from(package));
        args.extend(extra.iter().cloned());
        args
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.binary())
    }
}
