//! Jupyter data directory discovery
//!
//! Kernel specs live in `<data dir>/kernels/<name>`. The data directory depends on
//! the scope and on the host platform.

use std::env;
use std::path::{Path, PathBuf};

use super::Scope;
use crate::error::{InstallError, Result};

/// Overrides the per-user Jupyter data directory
pub const JUPYTER_DATA_DIR_ENV: &str = "JUPYTER_DATA_DIR";

/// Subdirectory of a Jupyter data directory holding kernel specs
pub const KERNELS_DIR: &str = "kernels";

/// Per-user Jupyter data directory
///
/// `JUPYTER_DATA_DIR` wins when set. Otherwise `~/Library/Jupyter` on macOS and
/// `<platform data dir>/jupyter` elsewhere (XDG on Linux, `%APPDATA%` on Windows).
pub fn user_data_dir() -> Result<PathBuf> {
    if let Some(dir) = env::var_os(JUPYTER_DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }

    let dir = if cfg!(target_os = "macos") {
        dirs::home_dir().map(|home| home.join("Library").join("Jupyter"))
    } else {
        dirs::data_dir().map(|data| data.join("jupyter"))
    };

    dir.ok_or(InstallError::DataDirUnavailable)
}

/// Jupyter data directory under an installation prefix
pub fn prefix_data_dir(prefix: &Path) -> PathBuf {
    prefix.join("share").join("jupyter")
}

/// System-wide Jupyter data directory
pub fn system_data_dir() -> PathBuf {
    if cfg!(windows) {
        env::var_os("PROGRAMDATA")
            .map_or_else(|| PathBuf::from(r"C:\ProgramData"), PathBuf::from)
            .join("jupyter")
    } else {
        PathBuf::from("/usr/local/share/jupyter")
    }
}

/// Directory holding kernel specs for `scope`
pub fn kernels_dir(scope: &Scope) -> Result<PathBuf> {
    let data_dir = match scope {
        Scope::User => user_data_dir()?,
        Scope::Prefix(prefix) => prefix_data_dir(prefix),
        Scope::System => system_data_dir(),
    };
    Ok(data_dir.join(KERNELS_DIR))
}
