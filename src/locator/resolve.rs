use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Decides whether a candidate path can be executed.
pub trait ExecutableCheck: Send + Sync {
    fn is_executable(&self, path: &Path) -> bool;
}

/// Real filesystem check: a regular file with an execute bit on Unix.
pub struct FsExecutableCheck;

impl ExecutableCheck for FsExecutableCheck {
    fn is_executable(&self, path: &Path) -> bool {
        if !path.is_file() {
            return false;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::metadata(path)
                .map(|m| (m.permissions().mode() & 0o111) != 0)
                .unwrap_or(false)
        }

        #[cfg(not(unix))]
        {
            // Best-effort: on non-unix, existence is our proxy.
            true
        }
    }
}

/// Resolve `name` against a PATH-style value, returning an absolute path.
pub fn find_in_path(search_path: &OsStr, name: &str, check: &dyn ExecutableCheck) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    let candidate = std::env::split_paths(search_path)
        .map(|dir| dir.join(name))
        .find(|candidate| check.is_executable(candidate))?;
    Some(std::path::absolute(&candidate).unwrap_or(candidate))
}

/// First directory in `dirs` holding an executable `name`.
pub fn find_in_dirs<'a>(
    dirs: impl IntoIterator<Item = &'a Path>,
    name: &str,
    check: &dyn ExecutableCheck,
) -> Option<PathBuf> {
    if name.is_empty() {
        return None;
    }

    dirs.into_iter()
        .map(|dir| dir.join(name))
        .find(|candidate| check.is_executable(candidate))
}
