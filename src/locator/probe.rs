use std::path::{Path, PathBuf};

/// System-wide prefixes, probed after the per-user ones.
const SYSTEM_DIRS: [&str; 2] = ["/opt/homebrew/bin", "/usr/local/bin"];

/// Ordered directories probed when a PATH lookup misses.
///
/// Covers where the uv installer, cargo, Homebrew and manual installs put
/// binaries. Per-user locations come first so a user install shadows a shared
/// one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeDirs(Vec<PathBuf>);

impl ProbeDirs {
    pub fn from_home(home: Option<&Path>) -> Self {
        let mut dirs = Vec::with_capacity(4);
        if let Some(home) = home {
            dirs.push(home.join(".local").join("bin"));
            dirs.push(home.join(".cargo").join("bin"));
        }
        dirs.extend(SYSTEM_DIRS.iter().map(PathBuf::from));
        Self(dirs)
    }

    pub fn from_dirs(dirs: Vec<PathBuf>) -> Self {
        Self(dirs)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
