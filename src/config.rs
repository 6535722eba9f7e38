use std::ffi::OsString;
use std::path::Path;

use log::debug;

use crate::locator::ProbeDirs;
use crate::tool::DEFAULT_PACKAGE;

/// Package spec to run, e.g. `nativ-mcp==0.1.0`.
pub const PACKAGE_ENV: &str = "NATIV_MCP_PACKAGE";
/// Truthy value disables the on-demand uv install.
pub const NO_INSTALL_ENV: &str = "NATIV_MCP_NO_INSTALL";
/// Read by the launched server; forwarded untouched.
pub const API_KEY_ENV: &str = "NATIV_API_KEY";

/// Settings for one bootstrapper invocation.
#[derive(Debug, Clone)]
pub struct LauncherConfig {
    pub package: OsString,
    pub install_enabled: bool,
    pub search_path: Option<OsString>,
    pub probe_dirs: ProbeDirs,
    /// Arguments given to the bootstrapper, appended after the package.
    pub extra_args: Vec<OsString>,
}

impl LauncherConfig {
    /// Load from the process environment, home directory and argv.
    pub fn from_env() -> Self {
        let home = dirs::home_dir();
        Self::from_lookup(|key| std::env::var_os(key), home.as_deref())
            .with_args(std::env::args_os().skip(1).collect())
    }

    /// Load through an injected variable lookup (for testing).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>, home: Option<&Path>) -> Self {
        let package = lookup(PACKAGE_ENV)
            .and_then(package_spec)
            .unwrap_or_else(|| OsString::from(DEFAULT_PACKAGE));

        let no_install = lookup(NO_INSTALL_ENV);
        let install_enabled = !is_truthy(no_install.as_deref().and_then(|v| v.to_str()));

        debug!(
            "package={} install_enabled={install_enabled} {API_KEY_ENV} set={}",
            package.to_string_lossy(),
            lookup(API_KEY_ENV).is_some()
        );

        Self {
            package,
            install_enabled,
            search_path: lookup("PATH"),
            probe_dirs: ProbeDirs::from_home(home),
            extra_args: Vec::new(),
        }
    }

    pub fn with_args(mut self, args: Vec<OsString>) -> Self {
        self.extra_args = args;
        self
    }
}

/// Trimmed package spec, or `None` when blank. Non-UTF-8 values pass through as-is.
fn package_spec(value: OsString) -> Option<OsString> {
    match value.to_str() {
        Some(text) if text.trim().is_empty() => None,
        Some(text) => Some(OsString::from(text.trim())),
        None => Some(value),
    }
}

/// `1`, `true` or `yes`, case-insensitive.
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(
        value.map(|v| v.trim().to_ascii_lowercase()).as_deref(),
        Some("1") | Some("true") | Some("yes")
    )
}
